//! Call-site resolution
//!
//! The function name of a call site is found by walking the stack, which is
//! expensive, so names are cached per instruction pointer. The line number is
//! never cached: it comes from `#[track_caller]` propagation and is exact for
//! every call.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::panic::Location;
use std::sync::{Arc, OnceLock};

/// Function name reported when the stack walk cannot name the caller
pub const ANONYMOUS: &str = "Anonymous";

/// Identity of the code that issued a log call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallerInfo {
    /// Demangled, fully qualified function name
    pub function: Arc<str>,
    pub line: u32,
}

impl CallerInfo {
    pub fn new(function: impl Into<Arc<str>>, line: u32) -> Self {
        Self {
            function: function.into(),
            line,
        }
    }

    fn anonymous(line: u32) -> Self {
        Self::new(ANONYMOUS, line)
    }

    pub fn is_anonymous(&self) -> bool {
        &*self.function == ANONYMOUS
    }
}

/// Resolves call sites and caches their function names.
///
/// The cache grows with the number of distinct call sites in the binary, not
/// with call volume, and entries never expire.
#[derive(Debug, Default)]
pub struct CallerResolver {
    names: RwLock<HashMap<usize, Arc<str>>>,
}

impl CallerResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide resolver shared by every logger
    pub fn global() -> &'static CallerResolver {
        static GLOBAL: OnceLock<CallerResolver> = OnceLock::new();
        GLOBAL.get_or_init(CallerResolver::new)
    }

    /// Resolve the caller `skip` frames above the frame that calls `resolve`.
    ///
    /// With `skip == 0` this is the function calling `resolve`. Wrappers that
    /// sit between the real call site and `resolve` must be `#[track_caller]`
    /// and `#[inline(never)]` so that both the line and the frame count hold.
    #[inline(never)]
    #[track_caller]
    pub fn resolve(&self, skip: usize) -> CallerInfo {
        let line = Location::caller().line();

        let mut found_self = false;
        let mut remaining = skip;
        let mut function = None;

        backtrace::trace(|frame| {
            let name = self.function_name(frame);
            if !found_self {
                found_self = name.as_deref().is_some_and(is_resolver_symbol);
                return true;
            }
            if remaining > 0 {
                remaining -= 1;
                return true;
            }
            function = name;
            false
        });

        match function {
            Some(function) => CallerInfo { function, line },
            None => CallerInfo::anonymous(line),
        }
    }

    /// Number of cached instruction pointers
    pub fn cached_sites(&self) -> usize {
        self.names.read().len()
    }

    fn function_name(&self, frame: &backtrace::Frame) -> Option<Arc<str>> {
        let ip = frame.ip() as usize;

        if let Some(name) = self.names.read().get(&ip) {
            return Some(Arc::clone(name));
        }

        // Resolve outside the lock; symbolication is the slow part.
        let mut resolved: Option<Arc<str>> = None;
        backtrace::resolve_frame(frame, |symbol| {
            if resolved.is_none() {
                if let Some(name) = symbol.name() {
                    resolved = Some(Arc::from(format!("{:#}", name)));
                }
            }
        });

        // Unresolvable frames are not cached so a later walk may still name them.
        let resolved = resolved?;
        let mut names = self.names.write();
        Some(Arc::clone(names.entry(ip).or_insert(resolved)))
    }
}

/// Matches both legacy (`a::CallerResolver::resolve`) and v0
/// (`<a::CallerResolver>::resolve`) demangled forms.
fn is_resolver_symbol(name: &str) -> bool {
    name.ends_with("::resolve") && name.contains("CallerResolver")
}
