use std::path::PathBuf;

use clap::Parser;

#[derive(Parser)]
#[command(about = "PIN-confirmed document signing service", author = env!("CARGO_PKG_AUTHORS"), version = env!("CARGO_PKG_VERSION"))]
pub struct CLIArgs {
    #[arg(
        short,
        long,
        help = "Use the <directory> as the working directory (logs, default config)",
        required = false
    )]
    pub work_dir: Option<PathBuf>,
    #[arg(
        short,
        long,
        help = "Use the <file name> as the location of the config file",
        required = false
    )]
    pub config: Option<PathBuf>,
    #[arg(long, help = "Do not install a tracing subscriber", default_value_t = false)]
    pub disable_logging: bool,
}
