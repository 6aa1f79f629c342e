mod cli;
mod command;
mod fetch;
mod render;
mod session;

use std::env;

use events_core::Action;
use log::{error, info};
use tokio::io::{self, AsyncBufReadExt, BufReader};

use crate::command::Command;
use crate::render::Page;
use crate::session::{Reply, Session};

fn setup_logging() {
    if env::var("LOG").is_err() {
        env::set_var("LOG", "reunion_events=info,events_core=info");
    }

    pretty_env_logger::init_custom_env("LOG");
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    dotenvy::dotenv().ok();
    setup_logging();

    let args = cli::parse(env::args().skip(1).collect());
    let client = reqwest::Client::new();
    let mut session = Session::new();

    if let Some(search) = args.search {
        session.dispatch(Action::SearchChanged(search));
    }

    let fetch = fetch::load(&client, &args.endpoint, &args.api_key);
    tokio::pin!(fetch);
    let mut fetched = false;

    if args.batch {
        session.dispatch((&mut fetch).await);
        fetched = true;
    } else {
        println!("{}", Page(session.state()));
        println!("Type `help` for a list of commands.");
    }

    let mut lines = BufReader::new(io::stdin()).lines();

    loop {
        tokio::select! {
            action = &mut fetch, if !fetched => {
                fetched = true;
                session.dispatch(action);
                println!("{}", Page(session.state()));
            }
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(err) => {
                        error!("Failed to read command: {err}");
                        break;
                    }
                };

                let command = match line.parse::<Command>() {
                    Ok(command) => command,
                    Err(command::CommandError::Empty) => continue,
                    Err(err) => {
                        println!("{err}");
                        continue;
                    }
                };

                match session.handle(command) {
                    Reply::Text(text) => println!("{text}"),
                    Reply::Export { path, calendar, count } => {
                        match tokio::fs::write(&path, calendar).await {
                            Ok(()) => {
                                info!("Exported {count} events to {}", path.display());
                                println!("Wrote {count} events to {}", path.display());
                            }
                            Err(err) => println!("Could not write {}: {err}", path.display()),
                        }
                    }
                    Reply::Quit => break,
                }
            }
        }
    }
}
