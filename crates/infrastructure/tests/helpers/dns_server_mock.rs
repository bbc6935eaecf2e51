#![allow(dead_code)]
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};
use tokio::task::JoinHandle;

/// Answer address served for every question.
pub const ANSWER_ADDR: [u8; 4] = [93, 184, 216, 34];

/// Address of the `ns1.<qname>` glue record in the additional section.
pub const GLUE_ADDR: [u8; 4] = [192, 0, 2, 53];

#[derive(Debug, Clone, Copy, Default)]
pub struct MockBehavior {
    pub truncate_udp: bool,
    pub truncate_tcp: bool,
    pub wrong_id: bool,
    /// Send UDP replies cut short in the middle of a record. The TC bit
    /// follows `truncate_udp`.
    pub cut_udp: bool,
}

/// Authoritative-looking server on loopback answering over UDP and TCP on
/// the same port.
pub struct MockDnsServer {
    addr: SocketAddr,
    udp_queries: Arc<AtomicUsize>,
    tcp_queries: Arc<AtomicUsize>,
    tasks: Vec<JoinHandle<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockBehavior) -> Self {
        let (udp, tcp) = Self::bind_pair().await;
        let addr = udp.local_addr().unwrap();

        let udp_queries = Arc::new(AtomicUsize::new(0));
        let tcp_queries = Arc::new(AtomicUsize::new(0));

        let udp_task = {
            let counter = udp_queries.clone();
            tokio::spawn(async move {
                let mut buf = vec![0u8; 4096];
                loop {
                    let Ok((len, peer)) = udp.recv_from(&mut buf).await else {
                        break;
                    };
                    counter.fetch_add(1, Ordering::SeqCst);
                    let response = if behavior.cut_udp {
                        cut_response(&buf[..len], behavior.truncate_udp, behavior.wrong_id)
                    } else {
                        build_response(&buf[..len], behavior.truncate_udp, behavior.wrong_id)
                    };
                    let _ = udp.send_to(&response, peer).await;
                }
            })
        };

        let tcp_task = {
            let counter = tcp_queries.clone();
            tokio::spawn(async move {
                loop {
                    let Ok((stream, _)) = tcp.accept().await else {
                        break;
                    };
                    let counter = counter.clone();
                    tokio::spawn(serve_tcp(stream, counter, behavior));
                }
            })
        };

        Self {
            addr,
            udp_queries,
            tcp_queries,
            tasks: vec![udp_task, tcp_task],
        }
    }

    async fn bind_pair() -> (UdpSocket, TcpListener) {
        for _ in 0..20 {
            let udp = UdpSocket::bind("127.0.0.1:0").await.unwrap();
            let port = udp.local_addr().unwrap().port();
            if let Ok(tcp) = TcpListener::bind(("127.0.0.1", port)).await {
                return (udp, tcp);
            }
        }
        panic!("could not bind UDP and TCP on the same loopback port");
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    pub fn endpoint(&self, scheme: &str) -> String {
        format!("{}://{}", scheme, self.addr)
    }

    pub fn udp_queries(&self) -> usize {
        self.udp_queries.load(Ordering::SeqCst)
    }

    pub fn tcp_queries(&self) -> usize {
        self.tcp_queries.load(Ordering::SeqCst)
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        for task in &self.tasks {
            task.abort();
        }
    }
}

async fn serve_tcp(mut stream: TcpStream, counter: Arc<AtomicUsize>, behavior: MockBehavior) {
    loop {
        let mut len_buf = [0u8; 2];
        if stream.read_exact(&mut len_buf).await.is_err() {
            return;
        }
        let mut query = vec![0u8; u16::from_be_bytes(len_buf) as usize];
        if stream.read_exact(&mut query).await.is_err() {
            return;
        }
        counter.fetch_add(1, Ordering::SeqCst);

        let response = build_response(&query, behavior.truncate_tcp, behavior.wrong_id);
        let mut framed = (response.len() as u16).to_be_bytes().to_vec();
        framed.extend_from_slice(&response);
        if stream.write_all(&framed).await.is_err() {
            return;
        }
    }
}

/// Builds a response echoing the question. A full response carries one A
/// answer, one NS authority record and one A glue record; a truncated one
/// carries the TC bit and no records.
pub fn build_response(query: &[u8], truncated: bool, wrong_id: bool) -> Vec<u8> {
    if query.len() < 12 {
        return vec![];
    }

    let mut response = Vec::with_capacity(512);

    let id = u16::from_be_bytes([query[0], query[1]]);
    let id = if wrong_id { id.wrapping_add(1) } else { id };
    response.extend_from_slice(&id.to_be_bytes());

    response.push(if truncated { 0x83 } else { 0x81 });
    response.push(0x80);

    response.extend_from_slice(&query[4..6]);
    let count: &[u8] = if truncated { &[0x00, 0x00] } else { &[0x00, 0x01] };
    response.extend_from_slice(count);
    response.extend_from_slice(count);
    response.extend_from_slice(count);

    response.extend_from_slice(&query[12..]);

    if truncated {
        return response;
    }

    // answer: <qname> A
    response.extend_from_slice(&[0xc0, 0x0c, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x00, 0x3c]);
    response.extend_from_slice(&[0x00, 0x04]);
    response.extend_from_slice(&ANSWER_ADDR);

    // authority: <qname> NS ns1.<qname>
    response.extend_from_slice(&[0xc0, 0x0c, 0x00, 0x02, 0x00, 0x01, 0x00, 0x00, 0x0e, 0x10]);
    response.extend_from_slice(&[0x00, 0x06, 0x03, b'n', b's', b'1', 0xc0, 0x0c]);

    // additional: ns1.<qname> A
    response.extend_from_slice(&[0x03, b'n', b's', b'1', 0xc0, 0x0c]);
    response.extend_from_slice(&[0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x01, 0x2c]);
    response.extend_from_slice(&[0x00, 0x04]);
    response.extend_from_slice(&GLUE_ADDR);

    response
}

/// Full response with its counts intact but the tail cut off inside the
/// authority record.
pub fn cut_response(query: &[u8], tc: bool, wrong_id: bool) -> Vec<u8> {
    let mut response = build_response(query, false, wrong_id);
    if response.is_empty() {
        return response;
    }
    if tc {
        response[2] |= 0x02;
    }
    response.truncate(response.len() - 25);
    response
}
