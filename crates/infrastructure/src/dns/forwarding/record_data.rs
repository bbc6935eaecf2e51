//! JSON rendering of resource record data.

use hickory_proto::rr::RData;
use serde_json::{json, Value};

pub fn render(data: &RData) -> Value {
    match data {
        RData::A(a) => json!({ "address": a.0.to_string() }),
        RData::AAAA(aaaa) => json!({ "address": aaaa.0.to_string() }),
        RData::CNAME(cname) => json!({ "target": cname.0.to_utf8() }),
        RData::NS(ns) => json!({ "target": ns.0.to_utf8() }),
        RData::PTR(ptr) => json!({ "target": ptr.0.to_utf8() }),
        RData::MX(mx) => json!({
            "preference": mx.preference(),
            "exchange": mx.exchange().to_utf8(),
        }),
        RData::TXT(txt) => {
            let strings: Vec<String> = txt
                .txt_data()
                .iter()
                .map(|s| String::from_utf8_lossy(s).into_owned())
                .collect();
            json!({ "txt": strings })
        }
        RData::SOA(soa) => json!({
            "mname": soa.mname().to_utf8(),
            "rname": soa.rname().to_utf8(),
            "serial": soa.serial(),
            "refresh": soa.refresh(),
            "retry": soa.retry(),
            "expire": soa.expire(),
            "minimum": soa.minimum(),
        }),
        RData::SRV(srv) => json!({
            "priority": srv.priority(),
            "weight": srv.weight(),
            "port": srv.port(),
            "target": srv.target().to_utf8(),
        }),
        other => json!({ "rdata": other.to_string() }),
    }
}
