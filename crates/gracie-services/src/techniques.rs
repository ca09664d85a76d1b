//! "Learn more" guides for the techniques the analysis reports on

use std::fmt;

/// Reference material for one manipulation technique
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TechniqueGuide {
    pub name: &'static str,
    pub definition: &'static str,
    pub examples: &'static [&'static str],
    pub warning_signs: &'static [&'static str],
    pub impact: &'static str,
    pub coping_strategies: &'static [&'static str],
}

/// A support hotline shown under every guide
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SupportLine {
    pub name: &'static str,
    pub contact: &'static str,
}

pub const SUPPORT_LINES: [SupportLine; 3] = [
    SupportLine {
        name: "National Domestic Violence Hotline",
        contact: "1-800-799-7233",
    },
    SupportLine {
        name: "Crisis Text Line",
        contact: "Text HOME to 741741",
    },
    SupportLine {
        name: "SAMHSA National Helpline",
        contact: "1-800-662-4357",
    },
];

pub const SUPPORT_REMINDER: &str =
    "Remember: You deserve to be treated with respect and kindness. Trust your instincts.";

pub const GUIDES: [TechniqueGuide; 4] = [
    TechniqueGuide {
        name: "Gaslighting",
        definition: "A form of psychological manipulation where the manipulator seeks to sow seeds of doubt in a targeted individual or group, making them question their own memory, perception, or judgment.",
        examples: &[
            "Denying events that clearly happened: 'I never said that' when you have clear memory of the conversation",
            "Questioning your memory: 'You're remembering it wrong' or 'That's not how it happened'",
            "Trivializing your feelings: 'You're being too sensitive' or 'You're overreacting'",
            "Diverting blame: 'If you hadn't done X, I wouldn't have had to do Y'",
        ],
        warning_signs: &[
            "You constantly second-guess yourself",
            "You feel confused and question your own memory",
            "You apologize frequently, even when you've done nothing wrong",
            "You feel like you're 'walking on eggshells'",
            "You make excuses for the other person's behavior",
        ],
        impact: "Gaslighting can severely damage your self-confidence and ability to trust your own perceptions. Over time, it can lead to anxiety, depression, and a distorted sense of reality.",
        coping_strategies: &[
            "Keep a journal of events and conversations",
            "Trust your instincts and feelings",
            "Seek validation from trusted friends or family",
            "Consider professional counseling",
            "Set clear boundaries and stick to them",
        ],
    },
    TechniqueGuide {
        name: "Blame Shifting",
        definition: "A tactic where an individual avoids responsibility for their actions by redirecting fault onto others, circumstances, or external factors.",
        examples: &[
            "'It's your fault I got angry' - making you responsible for their emotional reactions",
            "'I wouldn't have done it if you hadn't...' - conditional blame that makes their actions your responsibility",
            "Accusing you of the very behavior they're exhibiting",
            "Bringing up past mistakes to deflect from current issues",
        ],
        warning_signs: &[
            "They never take responsibility for their mistakes",
            "Every problem becomes your fault somehow",
            "They turn discussions about their behavior into attacks on you",
            "You find yourself constantly defending your actions",
            "They use phrases like 'You made me do it'",
        ],
        impact: "Blame shifting can make you feel responsible for problems you didn't create, leading to guilt, self-doubt, and an unhealthy sense of responsibility for others' actions.",
        coping_strategies: &[
            "Recognize that you're only responsible for your own actions",
            "Don't accept blame for others' choices and behaviors",
            "Use 'I' statements to express how their behavior affects you",
            "Stay focused on the specific issue at hand",
            "Seek support from others who can provide perspective",
        ],
    },
    TechniqueGuide {
        name: "Minimization",
        definition: "Downplaying the significance, impact, or severity of harmful behavior, making the victim feel like their concerns are invalid or exaggerated.",
        examples: &[
            "'It wasn't that bad' - dismissing the severity of their actions",
            "'I was just joking' - using humor as an excuse for hurtful behavior",
            "'You're making a big deal out of nothing' - invalidating your emotional response",
            "Comparing their behavior to worse examples to make it seem acceptable",
        ],
        warning_signs: &[
            "Your concerns are consistently dismissed as 'no big deal'",
            "They use humor to deflect serious conversations",
            "You're told you're 'too sensitive' when expressing hurt",
            "They compare their behavior to worse examples",
            "You start to doubt whether your feelings are valid",
        ],
        impact: "Minimization can make you question the validity of your own feelings and experiences, potentially leading you to accept unacceptable behavior.",
        coping_strategies: &[
            "Trust your feelings - if something hurts, it matters",
            "Don't let others define what should or shouldn't bother you",
            "Seek validation from trusted friends or counselors",
            "Document incidents to maintain perspective on their severity",
            "Set clear boundaries about what behavior is acceptable",
        ],
    },
    TechniqueGuide {
        name: "Projection",
        definition: "A defense mechanism where an individual unconsciously attributes their own thoughts, feelings, or behaviors to another person.",
        examples: &[
            "Someone who is lying accusing you of being dishonest",
            "A person feeling insecure attacking your confidence",
            "If they are being critical, they might accuse you of being judgmental",
        ],
        warning_signs: &[
            "They accuse you of things they do themselves",
            "Their criticisms of you seem to describe their own behavior",
            "They seem unable to see their own flaws but focus intensely on yours",
            "You feel like you're being blamed for their emotional state",
            "Their accusations don't match your actual behavior",
        ],
        impact: "Projection can be confusing and disorienting, making you question your own behavior and take on responsibility for the other person's issues.",
        coping_strategies: &[
            "Recognize projection when accusations don't match your behavior",
            "Don't internalize their projections as truth about yourself",
            "Maintain awareness of your own actual behaviors and motivations",
            "Consider whether their accusations better describe their own behavior",
            "Seek objective feedback from trusted sources",
        ],
    },
];

/// Look up a guide by technique name, ignoring case and surrounding space
pub fn guide(name: &str) -> Option<&'static TechniqueGuide> {
    let name = name.trim();
    GUIDES.iter().find(|g| g.name.eq_ignore_ascii_case(name))
}

pub fn guide_names() -> Vec<&'static str> {
    GUIDES.iter().map(|g| g.name).collect()
}

impl fmt::Display for TechniqueGuide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Understanding {}", self.name)?;
        writeln!(f)?;
        writeln!(f, "Definition")?;
        writeln!(f, "  {}", self.definition)?;
        writeln!(f)?;
        writeln!(f, "Common Examples")?;
        for example in self.examples {
            writeln!(f, "  - {}", example)?;
        }
        writeln!(f)?;
        writeln!(f, "Warning Signs")?;
        for sign in self.warning_signs {
            writeln!(f, "  ! {}", sign)?;
        }
        writeln!(f)?;
        writeln!(f, "Psychological Impact")?;
        writeln!(f, "  {}", self.impact)?;
        writeln!(f)?;
        writeln!(f, "Coping Strategies")?;
        for strategy in self.coping_strategies {
            writeln!(f, "  + {}", strategy)?;
        }
        writeln!(f)?;
        writeln!(f, "Need Support?")?;
        for line in &SUPPORT_LINES {
            writeln!(f, "  {}: {}", line.name, line.contact)?;
        }
        write!(f, "  {}", SUPPORT_REMINDER)
    }
}
