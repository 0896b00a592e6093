use std::path::PathBuf;

use clap::Parser;

use license_headers::UnreadablePolicy;

#[derive(Parser, Debug)]
#[command(
    name = "license-headers",
    about = "Report source files that are missing the required license header",
    version
)]
pub struct Cli {
    /// Root directory to scan
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// File name suffix to audit, matched case-sensitively [default: .java]
    #[arg(long, value_name = "EXT")]
    pub ext: Option<String>,

    /// File holding the exact header text [default: built-in Apache-2.0 header]
    #[arg(long, value_name = "FILE")]
    pub template: Option<PathBuf>,

    /// Config file [default: ./.license-headers/config.toml, fallback ~/.config/license-headers/config.toml]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// What to do with files that cannot be read or are not UTF-8 [default: fail]
    #[arg(long, value_name = "POLICY")]
    pub on_unreadable: Option<UnreadableArg>,

    /// Regex of root-relative paths to leave out; directories match with a trailing `/` (repeatable)
    #[arg(long, value_name = "REGEX")]
    pub exclude: Vec<String>,

    /// Report format
    #[arg(long, default_value = "terminal", value_name = "FORMAT")]
    pub report: ReportFormat,

    /// Exit with code 1 when any file is missing the header
    #[arg(long)]
    pub fail_on_missing: bool,

    /// Debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the result lines
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum ReportFormat {
    Terminal,
    Json,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum UnreadableArg {
    Fail,
    Skip,
}

impl From<&UnreadableArg> for UnreadablePolicy {
    fn from(arg: &UnreadableArg) -> Self {
        match arg {
            UnreadableArg::Fail => UnreadablePolicy::Fail,
            UnreadableArg::Skip => UnreadablePolicy::Skip,
        }
    }
}
