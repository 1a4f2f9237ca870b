mod app;
mod config;

use std::fs::File;
use std::io;
use std::time::Instant;

use gridkit::{Terminal, Toolkit};
use simplelog::{Config, WriteLogger};

use crate::app::Demo;
use crate::config::DemoConfig;

fn main() -> io::Result<()> {
    let config = DemoConfig::from_env();
    let log_file = File::create(&config.log_file)?;
    WriteLogger::init(config.log_level, Config::default(), log_file).map_err(io::Error::other)?;
    log::info!("listframe demo starting");

    let mut terminal = Terminal::new()?;
    let (width, height) = terminal.size();
    let toolkit = Toolkit::new(width, height);
    let demo = Demo::build(&toolkit);

    while !demo.should_quit() {
        terminal.draw(&toolkit)?;

        let timeout = toolkit.next_deadline().map_or(config.poll_interval, |deadline| {
            deadline
                .saturating_duration_since(Instant::now())
                .min(config.poll_interval)
        });
        for input in terminal.poll(Some(timeout))? {
            toolkit.dispatch(input);
        }
        toolkit.run_timers(Instant::now());
    }

    log::info!("listframe demo exiting");
    Ok(())
}
