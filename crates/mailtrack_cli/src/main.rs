//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `mailtrack_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

fn main() {
    println!("mailtrack_core ping={}", mailtrack_core::ping());
    println!("mailtrack_core version={}", mailtrack_core::core_version());
}
