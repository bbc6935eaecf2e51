pub mod classic;
pub mod doh;
pub mod factory;

pub use classic::{ClassicResolver, TransportMode};
pub use doh::DohResolver;
pub use factory::{create_resolver, Resolver, TransportResolverFactory};
