//! CPU details for the search summary. Display only.

use sysinfo::{CpuExt, CpuRefreshKind, RefreshKind, System, SystemExt};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CpuSummary {
    /// Brand string of the first CPU, e.g. "AMD Ryzen 9 5950X".
    pub model: String,
    /// Physical cores, falling back to logical CPUs when unknown.
    pub cores: usize,
}

impl CpuSummary {
    pub fn detect() -> Self {
        let sys = System::new_with_specifics(
            RefreshKind::new().with_cpu(CpuRefreshKind::new()),
        );
        let model = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_string())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| "unknown CPU".to_string());
        let cores = sys
            .physical_core_count()
            .unwrap_or_else(|| sys.cpus().len())
            .max(1);
        Self { model, cores }
    }
}
