//! End-to-end diagnosis scenarios over a scripted transport.

use logix_diag::{
    AttributeRequest, CipError, Client, ClientConfig, FaultDiagnosis, FaultRecord,
    ScriptedTransport, FAULT_QUERY_REQUEST, FAULT_RECORD_OFFSET,
};

fn fault_reply(fault_type: u16, code: u16, id1: u16, id2: u16, id3: u16) -> Vec<u8> {
    let mut reply = vec![0u8; FAULT_RECORD_OFFSET + 38];
    let mut put = |offset: usize, value: u16| {
        let at = FAULT_RECORD_OFFSET + offset;
        reply[at..at + 2].copy_from_slice(&value.to_le_bytes());
    };
    put(20, fault_type);
    put(22, code);
    put(24, id1);
    put(28, id2);
    put(32, id3);
    put(36, 0x00FF);
    reply
}

fn text_reply(text: &str) -> Vec<u8> {
    let mut reply = vec![0u8; 54];
    reply.extend_from_slice(text.as_bytes());
    reply
}

fn slot_reply(slot: u32) -> Vec<u8> {
    let mut reply = vec![0u8; 50];
    reply.extend_from_slice(&slot.to_le_bytes());
    reply
}

fn client(replies: Vec<Vec<u8>>) -> Client<ScriptedTransport> {
    let mut transport = ScriptedTransport::new();
    for reply in replies {
        transport.push_reply(reply);
    }
    Client::new(transport, ClientConfig::default())
}

#[test]
fn no_fault_makes_no_lookups() {
    let mut client = client(vec![fault_reply(0, 17, 1, 2, 34)]);

    assert_eq!(client.diagnose().unwrap(), FaultDiagnosis::NoFault);

    let transport = client.into_inner();
    assert_eq!(transport.sent(), &[FAULT_QUERY_REQUEST.to_vec()]);
}

#[test]
fn io_startup_failure_makes_no_lookups() {
    let mut client = client(vec![fault_reply(3, 23, 1, 2, 34)]);

    assert_eq!(client.diagnose().unwrap(), FaultDiagnosis::IoStartupFailure);
    assert_eq!(client.into_inner().sent().len(), 1);
}

#[test]
fn required_module_failure_fetches_slot() {
    let mut client = client(vec![fault_reply(1, 5, 1, 6, 34), slot_reply(7)]);

    assert_eq!(
        client.diagnose().unwrap(),
        FaultDiagnosis::RequiredIoModuleFailure { slot: 7 }
    );

    let transport = client.into_inner();
    let sent = transport.sent();
    assert_eq!(sent.len(), 2);
    assert_eq!(sent[1], hex::decode("03022069240601000a00").unwrap());
}

#[test]
fn logic_fault_fetches_task_then_program() {
    let mut client = client(vec![
        fault_reply(1, 5, 4, 9, 99),
        text_reply("MainTask"),
        text_reply("MainProgram"),
    ]);

    assert_eq!(
        client.diagnose().unwrap(),
        FaultDiagnosis::LogicFault {
            task: "MainTask".to_string(),
            program: "MainProgram".to_string(),
        }
    );

    let transport = client.into_inner();
    let sent = transport.sent();
    assert_eq!(sent.len(), 3);
    assert_eq!(sent[1], hex::decode("03022070240401001800").unwrap());
    assert_eq!(sent[2], hex::decode("03022068240901001c00").unwrap());
}

#[test]
fn failed_fault_query_returns_status_untouched() {
    let mut transport = ScriptedTransport::new();
    transport.push_failure(0x2A, "general failure");
    let mut client = Client::new(transport, ClientConfig::default());

    let response = client.fault_report();
    assert_eq!(response.status, 0x2A);
    assert!(response.value.is_none());

    let transport = client.into_inner();
    assert_eq!(transport.sent().len(), 1);
}

#[test]
fn failed_lookup_is_propagated_not_substituted() {
    let mut transport = ScriptedTransport::new();
    transport
        .push_reply(fault_reply(1, 5, 4, 9, 99))
        .push_reply(text_reply("MainTask"))
        .push_failure(0x16, "object does not exist");
    let mut client = Client::new(transport, ClientConfig::default());

    let err = client.diagnose().unwrap_err();
    assert_eq!(err.status(), 0x16);

    let response = client.fault_report();
    assert_eq!(response.value, None);
    assert_ne!(response.status, 0);
}

#[test]
fn short_fault_reply_is_rejected() {
    let mut client = client(vec![vec![0u8; 60]]);

    let err = client.diagnose().unwrap_err();
    assert!(matches!(err, CipError::ShortReply { .. }));
}

#[test]
fn fault_record_fields_decoded() {
    let mut client = client(vec![fault_reply(4, 20, 0x11, 0x22, 0x33)]);

    assert_eq!(
        client.fault_record().unwrap(),
        FaultRecord {
            fault_type: 4,
            code: 20,
            id1: 0x11,
            id2: 0x22,
            id3: 0x33,
            data: 0x00FF,
        }
    );
}

#[test]
fn task_name_round_trip() {
    let request = AttributeRequest::new(112, 24, 5).unwrap();
    let mut client = client(vec![text_reply("Periodic_100ms")]);

    assert_eq!(client.task_name(5).unwrap(), "Periodic_100ms");
    assert_eq!(client.into_inner().sent(), &[request.to_bytes()]);
}

#[test]
fn success_envelope_display() {
    let mut client = client(vec![fault_reply(1, 5, 1, 6, 34), slot_reply(3)]);

    let response = client.fault_report();
    assert!(response.is_success());
    assert_eq!(
        response.to_string(),
        "Response(Name=FaultDiagnosis, Value=Required IO Module Failure in slot 3, Status=Success)"
    );
}

#[cfg(feature = "serde")]
#[test]
fn diagnosis_serializes() {
    let diagnosis = FaultDiagnosis::RequiredIoModuleFailure { slot: 7 };
    let json = serde_json::to_string(&diagnosis).unwrap();
    assert_eq!(json, r#"{"RequiredIoModuleFailure":{"slot":7}}"#);
}
