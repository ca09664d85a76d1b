//! GRACIE Services - manipulation analysis, technique guides and checkout
//!
//! Everything here that talks to the network goes through a trait seam
//! (`AnalysisProvider`, `CheckoutGateway`) so the panel and checkout flows
//! can be driven by scripted responses in tests.

pub mod analysis;
pub mod checkout;
pub mod config;
pub mod panel;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod report;
pub mod techniques;

pub use analysis::{
    AnalysisInstance, AnalysisResult, BadgeVariant, ManipulationTechnique, Severity, Tone,
};
pub use checkout::{
    product_by_price_id, CheckoutClient, CheckoutFlow, CheckoutGateway, CheckoutMode,
    CredentialStore, HttpCheckoutGateway, Notice, NoticeVariant, Product, StaticCredentials,
    PRODUCTS,
};
pub use config::GracieConfig;
pub use panel::{AnalysisPanel, InputTab, PanelError, PanelStatus};
pub use provider::{AnalysisInput, AnalysisProvider, ImageAttachment, ProviderStatus};
pub use report::AnalysisReport;
pub use techniques::{guide, TechniqueGuide};
