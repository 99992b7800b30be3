use clap::{App, Arg};

/// Avaliable command line arguments
pub enum CliArg {
    Config,
    EtherHeader,
    Quiet,
    ReadFile,
    Snaplen,
    Verbose,
}

impl CliArg {
    pub fn as_str(&self) -> &'static str {
        match self {
            CliArg::Config => "config",
            CliArg::EtherHeader => "ether-header",
            CliArg::Quiet => "quiet",
            CliArg::ReadFile => "read",
            CliArg::Snaplen => "snaplen",
            CliArg::Verbose => "verbose",
        }
    }
}

/// Construct a new clap root command
pub fn new_root_command<'a>() -> clap::App<'a, 'static> {
    App::new(crate_name!())
        .version(crate_version!())
        .about("Print Ethernet frames carrying a MaxLinear GSW1XX switch tag")
        .args(&[
            Arg::with_name(CliArg::Config.as_str())
                .short("c")
                .value_name("FILE")
                .help("Use a specific config file")
                .takes_value(true),
            Arg::with_name(CliArg::EtherHeader.as_str())
                .short("e")
                .multiple(true)
                .help("Print the link level header, repeat for more details"),
            Arg::with_name(CliArg::Quiet.as_str())
                .short("q")
                .long("quiet")
                .help("Turn off info level logging")
                .conflicts_with(CliArg::Verbose.as_str()),
            Arg::with_name(CliArg::ReadFile.as_str())
                .short("r")
                .value_name("FRAME-FILE")
                .help("Read hex encoded frames, one per line, '-' for stdin")
                .takes_value(true),
            Arg::with_name(CliArg::Snaplen.as_str())
                .short("s")
                .value_name("SNAPLEN")
                .help("Only keep the first SNAPLEN bytes of every frame")
                .takes_value(true),
            Arg::with_name(CliArg::Verbose.as_str())
                .short("v")
                .long("verbose")
                .help("Turn on all debugging"),
        ])
}
