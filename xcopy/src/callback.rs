//! Observation hooks fired while a copy walks the source.

use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::{
    context::{Context, FieldId},
    ty::Type,
    value::Value,
};

/// Receives notifications as the engine walks a source value.
///
/// Every hook has a no-op default, so implementors override only what they
/// need. Hooks observe the walk and cannot alter it.
pub trait Callback: Send + Sync {
    /// A destination value is about to be built from scratch.
    fn begin_new(&self, ctx: &Context, source: &Value, dest: &Type) {
        let _ = (ctx, source, dest);
    }

    /// A destination value started with [`Callback::begin_new`] is complete.
    fn end_new(&self, ctx: &Context, source: &Value, dest: &Type) {
        let _ = (ctx, source, dest);
    }

    /// The engine entered `field`; `ctx` already includes it.
    fn push_field(&self, ctx: &Context, field: &FieldId, source: &Value, dest: &Type) {
        let _ = (ctx, field, source, dest);
    }

    /// The engine left `field`; `ctx` no longer includes it.
    fn pop_field(&self, ctx: &Context, field: &FieldId, source: &Value, dest: &Type) {
        let _ = (ctx, field, source, dest);
    }

    /// A scalar is about to be written.
    fn before_set_value(&self, ctx: &Context, source: &Value, dest: &Type) {
        let _ = (ctx, source, dest);
    }

    /// A scalar write finished, successfully or not.
    fn after_set_value(&self, ctx: &Context, source: &Value, dest: &Type) {
        let _ = (ctx, source, dest);
    }
}

/// Emits `tracing` debug events indented by nesting depth, logging each write
/// once it finishes.
#[derive(Debug, Default)]
pub struct TracingCallback {
    level: AtomicUsize,
}

impl TracingCallback {
    /// A tracer starting at depth zero.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            level: AtomicUsize::new(0),
        }
    }

    fn indent(&self) -> String {
        "  ".repeat(self.level.load(Ordering::Relaxed))
    }

    /// Indent for the current depth, then one level deeper.
    fn enter(&self) -> String {
        let indent = self.indent();
        self.level.fetch_add(1, Ordering::Relaxed);
        indent
    }

    /// One level shallower, then the indent for that depth.
    fn leave(&self) -> String {
        let _ = self
            .level
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
        self.indent()
    }
}

impl Callback for TracingCallback {
    fn begin_new(&self, ctx: &Context, _source: &Value, dest: &Type) {
        let indent = self.enter();
        tracing::debug!(
            target: "xcopy::trace",
            path = %ctx.path(),
            dest = %dest,
            "{indent}begin new"
        );
    }

    fn end_new(&self, ctx: &Context, _source: &Value, dest: &Type) {
        let indent = self.leave();
        tracing::debug!(
            target: "xcopy::trace",
            path = %ctx.path(),
            dest = %dest,
            "{indent}end new"
        );
    }

    fn push_field(&self, ctx: &Context, field: &FieldId, _source: &Value, _dest: &Type) {
        let indent = self.enter();
        tracing::debug!(
            target: "xcopy::trace",
            path = %ctx.path(),
            field = ?field,
            "{indent}push field"
        );
    }

    fn pop_field(&self, ctx: &Context, field: &FieldId, _source: &Value, _dest: &Type) {
        let indent = self.leave();
        tracing::debug!(
            target: "xcopy::trace",
            path = %ctx.path(),
            field = ?field,
            "{indent}pop field"
        );
    }

    fn after_set_value(&self, ctx: &Context, source: &Value, dest: &Type) {
        tracing::debug!(
            target: "xcopy::trace",
            path = %ctx.path(),
            source = %source.ty(),
            dest = %dest,
            "{}set value",
            self.indent()
        );
    }
}

/// One hook invocation captured by [`RecordingCallback`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TraceEvent {
    /// [`Callback::begin_new`] at `path` for `dest`.
    BeginNew {
        /// Rendered path.
        path: String,
        /// Rendered destination type.
        dest: String,
    },
    /// [`Callback::end_new`] at `path` for `dest`.
    EndNew {
        /// Rendered path.
        path: String,
        /// Rendered destination type.
        dest: String,
    },
    /// [`Callback::push_field`] leading to `path`.
    PushField {
        /// Rendered path including the field.
        path: String,
    },
    /// [`Callback::pop_field`] returning to `path`.
    PopField {
        /// Rendered path without the field.
        path: String,
    },
    /// [`Callback::before_set_value`] at `path`.
    SetValue {
        /// Rendered path.
        path: String,
        /// Rendered destination type.
        dest: String,
    },
}

/// Collects [`TraceEvent`]s in call order.
#[derive(Debug, Default)]
pub struct RecordingCallback {
    events: Mutex<Vec<TraceEvent>>,
}

impl RecordingCallback {
    /// An empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Events captured so far.
    #[must_use]
    pub fn events(&self) -> Vec<TraceEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    fn record(&self, event: TraceEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event);
        }
    }
}

impl Callback for RecordingCallback {
    fn begin_new(&self, ctx: &Context, _source: &Value, dest: &Type) {
        self.record(TraceEvent::BeginNew {
            path: ctx.path_string(),
            dest: dest.to_string(),
        });
    }

    fn end_new(&self, ctx: &Context, _source: &Value, dest: &Type) {
        self.record(TraceEvent::EndNew {
            path: ctx.path_string(),
            dest: dest.to_string(),
        });
    }

    fn push_field(&self, ctx: &Context, _field: &FieldId, _source: &Value, _dest: &Type) {
        self.record(TraceEvent::PushField {
            path: ctx.path_string(),
        });
    }

    fn pop_field(&self, ctx: &Context, _field: &FieldId, _source: &Value, _dest: &Type) {
        self.record(TraceEvent::PopField {
            path: ctx.path_string(),
        });
    }

    fn before_set_value(&self, ctx: &Context, _source: &Value, dest: &Type) {
        self.record(TraceEvent::SetValue {
            path: ctx.path_string(),
            dest: dest.to_string(),
        });
    }
}
