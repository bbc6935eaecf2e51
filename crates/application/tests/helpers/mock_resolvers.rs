use async_trait::async_trait;
use dnsql_application::ports::{DnsResolver, ResolvConfigSource, ResolverFactory};
use dnsql_domain::{
    DomainError, Question, ResolvConfig, ResourceRecord, ResponseMessage,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn record(name: &str, record_type: &str, ttl: u32, data: serde_json::Value) -> ResourceRecord {
    ResourceRecord {
        name: name.into(),
        record_type: record_type.to_string(),
        class: "IN".to_string(),
        ttl,
        data,
    }
}

#[derive(Default)]
pub struct ResponseBuilder {
    message: ResponseMessage,
}

impl ResponseBuilder {
    pub fn new() -> Self {
        Self {
            message: ResponseMessage {
                rcode: "NOERROR".to_string(),
                ..Default::default()
            },
        }
    }

    pub fn answer(mut self, record: ResourceRecord) -> Self {
        self.message.answers.push(record);
        self
    }

    pub fn authority(mut self, record: ResourceRecord) -> Self {
        self.message.authority.push(record);
        self
    }

    pub fn additional(mut self, record: ResourceRecord) -> Self {
        self.message.additional.push(record);
        self
    }

    pub fn build(self) -> ResponseMessage {
        self.message
    }
}

/// Resolver returning a canned response and recording every question.
pub struct MockDnsResolver {
    response: Mutex<Result<ResponseMessage, DomainError>>,
    questions: Mutex<Vec<Question>>,
}

impl MockDnsResolver {
    pub fn new(response: ResponseMessage) -> Self {
        Self {
            response: Mutex::new(Ok(response)),
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            response: Mutex::new(Err(error)),
            questions: Mutex::new(Vec::new()),
        }
    }

    pub fn questions(&self) -> Vec<Question> {
        self.questions.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn lookup(&self, question: &Question) -> Result<ResponseMessage, DomainError> {
        self.questions.lock().unwrap().push(question.clone());
        self.response.lock().unwrap().clone()
    }
}

/// Factory handing out one shared mock resolver and recording requested
/// nameservers. An optional error is returned instead of a resolver.
pub struct MockResolverFactory {
    resolver: Arc<MockDnsResolver>,
    error: Option<DomainError>,
    requested: Mutex<Vec<String>>,
}

impl MockResolverFactory {
    pub fn new(resolver: Arc<MockDnsResolver>) -> Self {
        Self {
            resolver,
            error: None,
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            resolver: Arc::new(MockDnsResolver::new(ResponseMessage::default())),
            error: Some(error),
            requested: Mutex::new(Vec::new()),
        }
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requested.lock().unwrap().len()
    }
}

impl ResolverFactory for MockResolverFactory {
    fn create(&self, nameserver: &str) -> Result<Arc<dyn DnsResolver>, DomainError> {
        self.requested.lock().unwrap().push(nameserver.to_string());
        match &self.error {
            Some(error) => Err(error.clone()),
            None => Ok(self.resolver.clone()),
        }
    }
}

/// Config source with a fixed snapshot and a load counter.
pub struct MockResolvConfigSource {
    config: ResolvConfig,
    loads: AtomicUsize,
}

impl MockResolvConfigSource {
    pub fn new(search: &[&str]) -> Self {
        Self {
            config: ResolvConfig {
                servers: vec!["10.0.0.1".to_string()],
                search: search.iter().map(|s| s.to_string()).collect(),
                ndots: 1,
            },
            loads: AtomicUsize::new(0),
        }
    }

    pub fn loads(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ResolvConfigSource for MockResolvConfigSource {
    async fn load(&self) -> Result<ResolvConfig, DomainError> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        Ok(self.config.clone())
    }
}
