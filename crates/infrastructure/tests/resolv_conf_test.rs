use dnsql_application::ports::ResolvConfigSource;
use dnsql_domain::{DomainError, Endpoint, ResolvConfig};
use dnsql_infrastructure::system::{system_endpoint, ResolvConfReader};
use std::io::Write;
use tempfile::NamedTempFile;

fn write_conf(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[tokio::test]
async fn test_reader_parses_file() {
    let file = write_conf(
        "# generated\nnameserver 10.0.0.1\nnameserver 10.0.0.2 ; secondary\nsearch corp.example lab.example\noptions ndots:3 timeout:2\n",
    );

    let config = ResolvConfReader::new(file.path()).load().await.unwrap();

    assert_eq!(config.servers, ["10.0.0.1", "10.0.0.2"]);
    assert_eq!(config.search, ["corp.example", "lab.example"]);
    assert_eq!(config.ndots, 3);
}

#[tokio::test]
async fn test_reader_sees_changes_between_calls() {
    let file = write_conf("search a.example\n");
    let reader = ResolvConfReader::new(file.path());

    assert_eq!(reader.load().await.unwrap().search, ["a.example"]);

    std::fs::write(file.path(), "search b.example\n").unwrap();

    assert_eq!(reader.load().await.unwrap().search, ["b.example"]);
}

#[tokio::test]
async fn test_missing_file_is_configuration_error() {
    let dir = tempfile::tempdir().unwrap();
    let reader = ResolvConfReader::new(dir.path().join("absent.conf"));

    let err = reader.load().await.unwrap_err();

    assert!(matches!(err, DomainError::ConfigError(_)));
}

#[test]
fn test_domain_keyword_sets_single_search_entry() {
    let config = ResolvConfig::parse("search a.example b.example\ndomain c.example\n");
    assert_eq!(config.search, ["c.example"]);
}

#[test]
fn test_system_endpoint_renders_single_server() {
    let config = ResolvConfig::parse("nameserver 192.0.2.1\nsearch corp.example\noptions ndots:2\n");
    let mut rng = fastrand::Rng::with_seed(7);

    let endpoint = system_endpoint(&config, &mut rng).unwrap();

    assert_eq!(endpoint, "udp://192.0.2.1:53?ndots=2&search=corp.example");

    let parsed: Endpoint = endpoint.parse().unwrap();
    assert_eq!(parsed.scheme(), "udp");
}

#[test]
fn test_system_endpoint_brackets_ipv6() {
    let config = ResolvConfig::parse("nameserver 2001:db8::53\n");
    let endpoint = system_endpoint(&config, &mut fastrand::Rng::with_seed(1)).unwrap();

    assert_eq!(endpoint, "udp://[2001:db8::53]:53?ndots=1");
    assert!(endpoint.parse::<Endpoint>().is_ok());
}

#[test]
fn test_system_endpoint_picks_a_configured_server() {
    let config = ResolvConfig::parse("nameserver 192.0.2.1\nnameserver 192.0.2.2\nnameserver 192.0.2.3\n");
    let mut rng = fastrand::Rng::with_seed(42);

    for _ in 0..32 {
        let endpoint = system_endpoint(&config, &mut rng).unwrap();
        assert!(
            config
                .servers
                .iter()
                .any(|s| endpoint.starts_with(&format!("udp://{}:53?", s))),
            "{}",
            endpoint
        );
    }
}

#[test]
fn test_system_endpoint_without_servers_fails() {
    let err = system_endpoint(&ResolvConfig::default(), &mut fastrand::Rng::new()).unwrap_err();
    assert!(matches!(err, DomainError::ConfigError(_)));
}
