use std::thread;

use mtwire_tl_parser::errors::ParseError;
use mtwire_tl_parser::tl::Category;
use mtwire_tl_types::{Registry, SharedRegistry};

#[test]
fn builtin_schema_registers_every_identified_line() {
    let reg = Registry::mtproto().unwrap();
    assert_eq!(reg.len(), 41);
    assert_eq!(reg.describe(0x60469778), "req_pq#60469778");
    assert_eq!(reg.describe(0x05162463), "resPQ#05162463");
    assert_eq!(reg.describe(0x73f1f8dc), "msg_container#73f1f8dc");
}

#[test]
fn builtin_schema_sorts_types_and_functions() {
    let reg = Registry::mtproto().unwrap();
    assert_eq!(reg.get(0x347773c5).unwrap().category(), Some(Category::Types));
    assert_eq!(reg.get(0x7abe77ec).unwrap().category(), Some(Category::Functions));
    let functions = reg.iter().filter(|c| c.category() == Some(Category::Functions)).count();
    assert_eq!(functions, 9);
}

#[test]
fn describe_renders_none_known_and_unknown() {
    let reg = Registry::mtproto().unwrap();
    assert_eq!(reg.describe(0), "none");
    assert_eq!(reg.describe(0xdeadbeef), "#deadbeef");
    assert_eq!(reg.describe(0x0949d9dc), "future_salt#0949d9dc");
    assert_eq!(Registry::new().describe(0x1), "#00000001");
}

#[test]
fn describe_payload_reads_leading_id() {
    let reg = Registry::mtproto().unwrap();
    assert_eq!(reg.describe_payload(&[0xec, 0x77, 0xbe, 0x7a, 1, 2, 3]), "ping#7abe77ec");
    assert_eq!(reg.describe_payload(&[0xec, 0x77, 0xbe]), "none");
    assert_eq!(reg.describe_payload(&[]), "none");
    assert_eq!(reg.describe_payload(&[0, 0, 0, 0]), "none");
}

#[test]
fn load_skips_comments_markers_and_untagged_lines() {
    let mut reg = Registry::new();
    let added = reg
        .load(
            "// handshake\n\
             \n\
             int ? = Int;\n\
             ---types---\n\
             pong#347773c5 msg_id:long ping_id:long = Pong;\n\
             ---functions---\n\
             ping#7abe77ec ping_id:long = Pong\n",
        )
        .unwrap();
    assert_eq!(added, 2);
    assert_eq!(reg.len(), 2);
    assert!(reg.contains(0x7abe77ec));
    assert!(!reg.contains(0));

    let ping = reg.get(0x7abe77ec).unwrap();
    assert_eq!(ping.name, "ping");
    assert_eq!(ping.category(), Some(Category::Functions));
    assert_eq!(ping.definition.as_ref().unwrap().params.len(), 1);
}

#[test]
fn namespaced_names_keep_their_prefix() {
    let reg = Registry::from_schema("auth.sentCode#5e002502 phone_code_hash:string = auth.SentCode;")
        .unwrap();
    assert_eq!(reg.describe(0x5e002502), "auth.sentCode#5e002502");
}

#[test]
fn short_hex_id_is_fatal_and_leaves_registry_untouched() {
    let mut reg = Registry::new();
    reg.register(0x11111111, "existing");

    let err = reg
        .load(
            "pong#347773c5 msg_id:long ping_id:long = Pong;\n\
             ping#7abe77e ping_id:long = Pong;\n",
        )
        .unwrap_err();

    assert_eq!(err.0.line, 2);
    assert_eq!(err.0.error, ParseError::InvalidIdLength { id: "7abe77e".into() });
    assert!(err.to_string().starts_with("invalid schema:"));

    assert_eq!(reg.len(), 1);
    assert!(!reg.contains(0x347773c5));
}

#[test]
fn non_hex_id_is_fatal() {
    let err = Registry::from_schema("ping#7abe77eg ping_id:long = Pong;").unwrap_err();
    assert_eq!(err.0.error, ParseError::InvalidId { id: "7abe77eg".into() });
}

#[test]
fn api_schema_header_lines_are_indexed() {
    let reg = Registry::from_schema(
        "vector#1cb5c415 {t:Type} # [ t ] = Vector t;\n\
         foo#12345678 bar:int\n\
         user#3ff6ecb0 flags:# self:flags.10?true id:long = User;",
    )
    .unwrap();
    assert_eq!(reg.len(), 3);
    assert_eq!(reg.describe(0x1cb5c415), "vector#1cb5c415");
    assert_eq!(reg.describe(0x12345678), "foo#12345678");
    assert_eq!(reg.describe(0x3ff6ecb0), "user#3ff6ecb0");
}

#[test]
fn duplicate_id_is_last_write_wins() {
    let mut reg = Registry::new();
    assert!(reg.register(0xabcdef01, "first").is_none());

    let prev = reg.register(0xabcdef01, "second").unwrap();
    assert_eq!(prev.name, "first");
    assert_eq!(reg.describe(0xabcdef01), "second#abcdef01");

    // both registrations remain visible to iteration
    let names: Vec<_> = reg.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, ["first", "second"]);
}

#[test]
fn duplicate_within_schema_text_keeps_the_later_line() {
    let reg = Registry::from_schema(
        "old_pong#347773c5 msg_id:long = Pong;\n\
         pong#347773c5 msg_id:long ping_id:long = Pong;\n",
    )
    .unwrap();
    assert_eq!(reg.describe(0x347773c5), "pong#347773c5");
    assert_eq!(reg.len(), 2);
}

#[test]
fn extra_schema_extends_builtin() {
    let mut reg = Registry::mtproto().unwrap();
    let added = reg.load("updateShort#78d4dec1 update:Update date:int = Updates;").unwrap();
    assert_eq!(added, 1);
    assert_eq!(reg.describe(0x78d4dec1), "updateShort#78d4dec1");
    assert_eq!(reg.describe(0x7abe77ec), "ping#7abe77ec");
}

#[test]
fn shared_registry_is_visible_across_threads() {
    let shared = SharedRegistry::from(Registry::mtproto().unwrap());

    let handles: Vec<_> = (0..4u32)
        .map(|i| {
            let shared = shared.clone();
            thread::spawn(move || {
                shared.register(0x1000_0000 + i, format!("extra_{i}"));
                shared.describe(0x7abe77ec)
            })
        })
        .collect();

    for h in handles {
        assert_eq!(h.join().unwrap(), "ping#7abe77ec");
    }
    for i in 0..4u32 {
        assert_eq!(shared.describe(0x1000_0000 + i), format!("extra_{i}#{:08x}", 0x1000_0000 + i));
    }
    assert_eq!(shared.read().len(), 45);
}

#[test]
fn shared_registry_load_is_atomic() {
    let shared = SharedRegistry::new(Registry::new());
    assert!(shared.load("a#00000001 = A;\nb#0001 = B;").is_err());
    assert!(shared.read().is_empty());

    assert_eq!(shared.load("a#00000001 = A;\nb#00000002 = B;").unwrap(), 2);
    assert_eq!(shared.describe_payload(&2u32.to_le_bytes()), "b#00000002");
}
