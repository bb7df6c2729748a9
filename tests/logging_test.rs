//! Registry and codec events seen through a tracing subscriber

use std::io;
use std::sync::{Arc, Mutex};

use pinjson::chainsvr::GetBlockCountCmd;
use pinjson::core::{Registry, RpcVersion};
use tracing_subscriber::fmt::MakeWriter;

#[derive(Clone, Default)]
struct Captured(Arc<Mutex<Vec<u8>>>);

impl Captured {
    fn text(&self) -> String {
        String::from_utf8(self.0.lock().unwrap().clone()).unwrap()
    }
}

impl io::Write for Captured {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().unwrap().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl<'a> MakeWriter<'a> for Captured {
    type Writer = Captured;

    fn make_writer(&'a self) -> Self::Writer {
        self.clone()
    }
}

#[test]
fn test_registry_and_codec_events() {
    let captured = Captured::default();
    let subscriber = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::TRACE)
        .with_ansi(false)
        .with_writer(captured.clone())
        .finish();

    tracing::subscriber::with_default(subscriber, || {
        let registry = Registry::builder()
            .register::<GetBlockCountCmd>()
            .unwrap()
            .build();
        registry
            .marshal_cmd(RpcVersion::V1, 1i64, &GetBlockCountCmd)
            .unwrap();
        let err = registry.new_cmd("getblockcount", vec![serde_json::json!(1)]);
        assert!(err.is_err());
    });

    let logs = captured.text();
    assert!(logs.contains("registered command"), "{}", logs);
    assert!(logs.contains("method=getblockcount"), "{}", logs);
    assert!(logs.contains("built command registry"), "{}", logs);
    assert!(logs.contains("marshaled command"), "{}", logs);
    // Failures are returned to the caller, never logged
    assert!(!logs.contains("ERROR"), "{}", logs);
}
