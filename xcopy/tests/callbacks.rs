//! Observation hooks.

mod common;

use std::{
    io,
    sync::{Arc, Mutex},
};

use common::string_map;
use rstest::rstest;
use xcopy::{Callback, Config, RecordingCallback, TraceEvent, TracingCallback, Type};

fn begin(path: &str, dest: &str) -> TraceEvent {
    TraceEvent::BeginNew {
        path: path.to_owned(),
        dest: dest.to_owned(),
    }
}

fn end(path: &str, dest: &str) -> TraceEvent {
    TraceEvent::EndNew {
        path: path.to_owned(),
        dest: dest.to_owned(),
    }
}

#[rstest]
fn recorder_sees_every_hook_in_order() {
    let recorder = Arc::new(RecordingCallback::new());
    let hook: Arc<dyn Callback> = recorder.clone();
    let config = Config::builder().callback(hook).build();
    let dest = Type::map(Type::string(), Type::string());
    config
        .copy_to_new(&string_map(&[("a", "1")]), &dest)
        .expect("copies");

    assert_eq!(
        recorder.events(),
        vec![
            begin("", "map<string, string>"),
            TraceEvent::PushField {
                path: "a".to_owned()
            },
            begin("a", "string"),
            TraceEvent::SetValue {
                path: "a".to_owned(),
                dest: "string".to_owned(),
            },
            end("a", "string"),
            TraceEvent::PopField {
                path: String::new()
            },
            end("", "map<string, string>"),
        ]
    );
}

#[rstest]
fn recorder_sees_failed_writes() {
    let recorder = Arc::new(RecordingCallback::new());
    let hook: Arc<dyn Callback> = recorder.clone();
    let config = Config::builder().callback(hook).build();
    let dest = Type::map(Type::string(), Type::i32());
    assert!(
        config
            .copy_to_new(&string_map(&[("a", "x")]), &dest)
            .is_err()
    );
    let events = recorder.events();
    assert!(events.contains(&TraceEvent::PopField {
        path: String::new()
    }));
    assert_eq!(events.last(), Some(&end("", "map<string, i32>")));
}

#[derive(Clone, Default)]
struct SharedBuf(Arc<Mutex<Vec<u8>>>);

impl SharedBuf {
    fn contents(&self) -> String {
        let bytes = self.0.lock().expect("buffer lock").clone();
        String::from_utf8(bytes).expect("utf-8 log output")
    }
}

impl io::Write for SharedBuf {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.lock().expect("buffer lock").extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

#[rstest]
fn tracing_callback_indents_by_depth() {
    let buf = SharedBuf::default();
    let writer = buf.clone();
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new("xcopy::trace=debug"))
        .with_writer(move || writer.clone())
        .with_ansi(false)
        .finish();
    let config = Config::builder()
        .callback(Arc::new(TracingCallback::new()))
        .build();

    tracing::subscriber::with_default(subscriber, || {
        config
            .copy_to_new(
                &string_map(&[("a", "1")]),
                &Type::map(Type::string(), Type::string()),
            )
            .expect("copies");
    });

    let output = buf.contents();
    let lines: Vec<&str> = output
        .lines()
        .filter_map(|line| line.split_once("xcopy::trace: ").map(|(_, rest)| rest))
        .map(|rest| rest.split(" path=").next().unwrap_or(rest))
        .collect();
    assert_eq!(
        lines,
        [
            "begin new",
            "  push field",
            "    begin new",
            "      set value",
            "    end new",
            "  pop field",
            "end new",
        ]
    );
}
