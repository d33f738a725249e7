// crates/caremesh-benchmark/src/lib.rs
//
// caremesh-benchmark: Outcome-trend benchmarking for the CareMesh network.
//
// A participant compares its own response-trend distribution against an
// anonymized network average, gated by the same earned-level model that
// gates record sharing. The network average is a mean of per-participant
// distributions, so one large participant cannot dominate it, and no
// participant name ever appears in it.

pub mod distribution;
pub mod report;

pub use distribution::TrendDistribution;
pub use report::{benchmark_for, BenchmarkLockReason, BenchmarkReport};
