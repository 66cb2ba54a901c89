use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::PathBuf;

use sentinel_core::{
    ChannelObserver, Config, Controller, ReplaySource, SetupError, TrackingFlag,
};
use tokio::sync::{broadcast, mpsc};

use super::CommandResult;

pub fn run(input: &str, tracking: Option<bool>) -> CommandResult {
    let config = Config::load()?;
    let school_id = super::require_school_id(&config)?;
    let client = super::client_from(&config)?;

    // A replay that cannot be opened means capture cannot start at all;
    // surface the degraded state instead of panicking.
    let reader: Box<dyn BufRead + Send> = if input == "-" {
        Box::new(BufReader::new(io::stdin()))
    } else {
        let path = PathBuf::from(input);
        let file = File::open(&path).map_err(|source| SetupError::ReplayOpen { path, source })?;
        Box::new(BufReader::new(file))
    };
    let source = ReplaySource::from_reader(reader);

    let tracking = TrackingFlag::new(tracking.unwrap_or(config.detection.tracking));
    let controller = Controller::new(
        client,
        config.schedule.clone(),
        school_id,
        config.detection.threshold,
        tracking,
        config.sync.backoff_policy(),
    );
    let mut events = controller.subscribe();

    let rt = super::runtime()?;
    rt.block_on(async move {
        let (tx, rx) = mpsc::channel(64);
        let run_handle = tokio::spawn(controller.run(rx));

        let feeder = std::thread::spawn(move || {
            let mut observer = ChannelObserver::new(tx);
            source.run(&mut observer);
        });

        let printer = tokio::spawn(async move {
            loop {
                match events.recv().await {
                    Ok(event) => {
                        if let Ok(line) = serde_json::to_string(&event) {
                            println!("{line}");
                        }
                    }
                    Err(broadcast::error::RecvError::Lagged(_)) => continue,
                    Err(broadcast::error::RecvError::Closed) => break,
                }
            }
        });

        let controller = run_handle.await?;
        let _ = feeder.join();

        // Dropping the controller closes the event stream once any
        // in-flight dispatch finishes, which ends the printer.
        drop(controller);
        printer.await?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })?;

    Ok(())
}
