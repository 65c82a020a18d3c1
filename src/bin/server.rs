use clap::Parser;
use monodis::{server, Error};

const PORT: u16 = 6379;

#[derive(Parser, Debug)]
struct Args {
    /// The address to bind to
    #[arg(short, long, default_value = "127.0.0.1")]
    address: String,

    /// The port to listen on
    #[arg(short, long, default_value_t = PORT)]
    port: u16,
}

fn main() -> Result<(), Error> {
    let args = Args::parse();

    let config = server::Config {
        address: args.address,
        port: args.port,
        ..server::Config::default()
    };

    // The reactor is single-threaded: one current-thread runtime, with
    // connections as local tasks.
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let local = tokio::task::LocalSet::new();
    local.block_on(&runtime, server::run(config))
}
