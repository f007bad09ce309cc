use clap::Parser;

/// Glimt command line interface arguments.
#[derive(Parser, Debug)]
#[clap(author, version, about = "Interactive Cook-Torrance material preview.")]
pub struct CliArgs {
    /// Initial roughness of the previewed material.
    #[clap(long, default_value_t = 0.5, help = "Initial roughness, clamped to [0, 1]")]
    pub roughness: f32,

    /// Initial metalness of the previewed material.
    #[clap(long, default_value_t = 0.5, help = "Initial metallic, clamped to [0, 1]")]
    pub metallic: f32,

    /// Whether to print verbose information to stdout.
    #[clap(short, long, help = "Use verbose output (log level = 4)")]
    pub verbose: bool,

    /// Whether to show the timestamp in the log.
    #[clap(
        long,
        help = "Show timestamp for each log message in seconds since\nprogram starts"
    )]
    pub log_timestamp: bool,

    /// Verbosity level for the log.
    #[clap(
        long,
        help = "Setting logging verbosity level (higher for more\ndetails)\n  0 - error\n  1 - \
                warn + error\n  2 - info + warn + error\n  3 - debug + info + warn + error\n  4 - \
                trace + debug + info + warn + error\n\x08",
        default_value_t = 1
    )]
    pub log_level: u8,

    #[clap(long, help = "Enable debug messages from `wgpu-rs` and `naga`")]
    pub debug_wgpu: bool,
}
