/*
Copyright 2022 Volker Schwaberow <volker@schwaberow.de>
Permission is hereby granted, free of charge, to any person obtaining a
copy of this software and associated documentation files (the
"Software"), to deal in the Software without restriction, including without
limitation the rights to use, copy, modify, merge, publish, distribute,
sublicense, and/or sell copies of the Software, and to permit persons to whom the
Software is furnished to do so, subject to the following conditions:
The above copyright notice and this permission notice shall be
included in all copies or substantial portions of the Software.
THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND, EXPRESS
OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND NONINFRINGEMENT. IN NO EVENT
SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE LIABLE FOR ANY CLAIM, DAMAGES OR
OTHER LIABILITY, WHETHER IN AN ACTION OF CONTRACT, TORT OR OTHERWISE,
ARISING FROM, OUT OF OR IN CONNECTION WITH THE SOFTWARE OR THE USE OR OTHER
DEALINGS IN THE SOFTWARE.
Author(s): Volker Schwaberow
*/

use clap::Parser;
use colored::*;
use log::debug;
use protoprobe::cli::{Cli, Commands};
use protoprobe::errors::ProbeResult;
use protoprobe::http_probe::HttpProbe;
use protoprobe::ws_handshake::WebSocketProbe;
use simple_logger::SimpleLogger;
use std::process::ExitCode;

async fn dispatch(cli: &Cli) -> ProbeResult<()> {
    let config = cli.probe_config();

    match &cli.command {
        Commands::Http(args) => {
            let target = &args.target;
            let status = HttpProbe::new(&target.host, target.port, &target.path, args.expect_status)
                .with_config(config)
                .run()
                .await?;
            debug!("Status {} matched", status);
        }
        Commands::Ws(target) => {
            let accept = WebSocketProbe::new(&target.host, target.port, &target.path)
                .with_config(config)
                .run()
                .await?;
            debug!("Sec-WebSocket-Accept {} verified", accept);
        }
    }

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.no_color {
        colored::control::set_override(false);
    }

    if let Err(e) = SimpleLogger::new().with_level(cli.level_filter()).init() {
        eprintln!("failed to initialize logger: {}", e);
    }

    match dispatch(&cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", "error:".red().bold(), e);
            ExitCode::FAILURE
        }
    }
}
