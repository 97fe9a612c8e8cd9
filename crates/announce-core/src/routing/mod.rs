/// Recipient routing modules
pub mod policy;
pub mod resolver;

pub use policy::RecipientPolicy;
pub use resolver::RecipientResolver;
