use std::env;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::process;
use std::thread;

use bank_otp::{Account, Session};
use tokio_stream::wrappers::ReceiverStream;
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(LevelFilter::WARN.into()))
        .with_writer(io::stderr)
        .init();

    // optional script file; commands come from stdin otherwise
    let script = env::args().nth(1);

    let input: Box<dyn BufRead + Send> = match &script {
        Some(path) => match File::open(path) {
            Ok(file) => Box::new(BufReader::new(file)),
            Err(e) => {
                error!(path, "failed to open script: {e}");
                process::exit(2);
            }
        },
        None => Box::new(BufReader::new(io::stdin())),
    };

    let (line_sender, line_receiver) = tokio::sync::mpsc::channel(16);

    // plain thread: a blocked stdin read must not hold up runtime shutdown
    thread::spawn(move || {
        for line in input.lines() {
            match line {
                Ok(line) => {
                    if line_sender.blocking_send(line).is_err() {
                        // session has ended
                        break;
                    }
                }
                Err(e) => {
                    warn!("{e}");
                    break;
                }
            }
        }
    });

    let mut session = Session::new(Account::new(), io::stdout());
    if let Err(e) = session.run(ReceiverStream::new(line_receiver)).await {
        error!("failed to write output: {e}");
        process::exit(1);
    }
}
