use serde::Serialize;
use std::time::Duration;

use crate::kmer::packed_len;
use crate::pipeline::ExecutionMode;

/// Timing and size report for one or more pipeline runs.
#[derive(Debug, Clone, Serialize)]
pub struct RunStats {
    pub mode: ExecutionMode,
    pub sequences: usize,
    pub skipped: usize,
    pub symbols: usize,
    pub smers: usize,
    pub input_bytes: usize,
    pub output_bytes: usize,
    pub elapsed_secs: f64,
    /// (input + output bytes) per second, in GB/s
    pub throughput_gbps: f64,
}

impl RunStats {
    pub fn new(mode: ExecutionMode) -> Self {
        Self {
            mode,
            sequences: 0,
            skipped: 0,
            symbols: 0,
            smers: 0,
            input_bytes: 0,
            output_bytes: 0,
            elapsed_secs: 0.0,
            throughput_gbps: 0.0,
        }
    }

    /// Account for one hashed sequence of `n` symbols.
    pub fn record(&mut self, n: usize, n_smers: usize) {
        self.sequences += 1;
        self.symbols += n;
        self.smers += n_smers;
        self.input_bytes += packed_len(n) * std::mem::size_of::<u64>();
        self.output_bytes += n_smers * std::mem::size_of::<u64>();
    }

    pub fn finish(&mut self, elapsed: Duration) {
        self.elapsed_secs = elapsed.as_secs_f64();
        self.throughput_gbps = throughput_gbps(self.input_bytes + self.output_bytes, elapsed);
    }
}

/// Bytes moved per second, in GB/s. Zero for a zero duration.
pub fn throughput_gbps(bytes: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        bytes as f64 / secs / 1e9
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_sizes() {
        let mut stats = RunStats::new(ExecutionMode::Dataflow);
        stats.record(1024, 997);
        assert_eq!(stats.input_bytes, 128 * 8);
        assert_eq!(stats.output_bytes, 997 * 8);
        stats.finish(Duration::from_secs(1));
        assert!((stats.throughput_gbps - 9000.0 / 1e9).abs() < 1e-12);
    }

    #[test]
    fn test_zero_duration() {
        assert_eq!(throughput_gbps(100, Duration::ZERO), 0.0);
    }

    #[test]
    fn test_serializes_mode_lowercase() {
        let stats = RunStats::new(ExecutionMode::Sequential);
        let json = serde_json::to_string(&stats).unwrap();
        assert!(json.contains("\"mode\":\"sequential\""));
    }
}
