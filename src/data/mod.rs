/// Data layer: core types, file loading and band averaging.
///
/// Architecture:
/// ```text
///  Input Files.csv        spectrum .csv (one per row)
///        │                       │
///        ▼                       ▼
///   ┌──────────┐           ┌──────────┐
///   │  loader   │ manifest  │  loader   │  → Spectrum
///   └──────────┘           └──────────┘
///        │                       │
///        │                       ▼
///        │                 ┌──────────┐
///        │                 │   band    │  mean CPS over the window
///        │                 └──────────┘
///        ▼                       ▼
///   ┌──────────────────────────────────┐
///   │ analysis: baseline + volume corr. │ → CorrectedSeries
///   └──────────────────────────────────┘
/// ```

pub mod band;
pub mod loader;
pub mod model;
