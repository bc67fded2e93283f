//! Print what an MTProto payload contains.
//!
//! # Run
//! ```text
//! mtwire-inspect captured.bin
//! mtwire-inspect --plain --schema extra.tl handshake.bin
//! xxd -r -p dump.hex | mtwire-inspect -
//! ```
//!
//! Set `RUST_LOG=mtwire=debug` to see registry and decoder diagnostics.

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;
use mtwire::Registry;
use mtwire::mtproto::{PlainMessage, ServiceMessage, container};
use mtwire::tl::types::Message;

#[derive(Parser)]
#[command(name = "mtwire-inspect", version, about = "Describe an MTProto payload")]
struct Cli {
    /// Binary input file, or `-` for stdin.
    input: PathBuf,

    /// Extra TL schema to load after the built-in one. May be repeated.
    #[arg(long = "schema", value_name = "FILE")]
    schemas: Vec<PathBuf>,

    /// The input is a plaintext envelope (`auth_key_id = 0`, msg_id, length, body).
    #[arg(long)]
    plain: bool,

    /// Open containers and gzip bodies and list every inner message.
    #[arg(long)]
    flatten: bool,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("✗ {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let mut registry = Registry::mtproto()?;
    for path in &cli.schemas {
        let added = registry.load(&fs::read_to_string(path)?)?;
        log::info!("loaded {added} combinators from {}", path.display());
    }

    let input = read_input(&cli.input)?;

    let (msg_id, body) = if cli.plain {
        let (plain, used) = PlainMessage::from_bytes(&input)?;
        if used < input.len() {
            log::warn!("{} trailing bytes after the message", input.len() - used);
        }
        println!(
            "plaintext msg_id={:#018x} time={} body={} bytes",
            plain.msg_id.0,
            plain.msg_id.unix_secs(),
            plain.body.len()
        );
        (plain.msg_id.0, plain.body)
    } else {
        (0, input)
    };

    println!("{}", registry.describe_payload(&body));

    if cli.flatten {
        let leaves = container::flatten(Message { msg_id, seqno: 0, body })?;
        for (i, leaf) in leaves.iter().enumerate() {
            println!(
                "  [{i}] msg_id={:#018x} seqno={} {}",
                leaf.msg_id,
                leaf.seqno,
                describe(&leaf.body, &registry)
            );
        }
    } else {
        println!("  {}", describe(&body, &registry));
    }
    Ok(())
}

fn describe(body: &[u8], registry: &Registry) -> String {
    match ServiceMessage::decode(body) {
        Ok((msg, used)) => {
            let mut out = msg.describe(registry);
            if used < body.len() {
                out.push_str(&format!(" (+{} trailing bytes)", body.len() - used));
            }
            out
        }
        Err(e) => format!("undecodable: {}", e.describe(registry)),
    }
}

fn read_input(path: &Path) -> io::Result<Vec<u8>> {
    if path.as_os_str() == "-" {
        let mut buf = Vec::new();
        io::stdin().read_to_end(&mut buf)?;
        Ok(buf)
    } else {
        fs::read(path)
    }
}
