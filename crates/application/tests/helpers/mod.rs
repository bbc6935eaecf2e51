#![allow(dead_code)]

mod mock_resolvers;

pub use mock_resolvers::{
    record, MockDnsResolver, MockResolvConfigSource, MockResolverFactory, ResponseBuilder,
};
