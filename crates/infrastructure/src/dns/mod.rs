pub mod forwarding;
pub mod resolver;
pub mod transport;

pub use resolver::{
    create_resolver, ClassicResolver, DohResolver, Resolver, TransportMode,
    TransportResolverFactory,
};
