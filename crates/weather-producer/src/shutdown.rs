use tokio::sync::watch;

/// Route SIGINT, SIGTERM and SIGHUP into a watch channel.
///
/// Relies on the `termination` feature of `ctrlc`; without it only SIGINT is
/// caught and `docker stop` or `systemctl stop` would kill the process
/// before the broker connection is closed. Can be installed once per process.
///
/// The returned sender must outlive the receiver's users: dropping it makes
/// `changed()` resolve with an error, which the node treats as shutdown.
pub fn setup_shutdown() -> Result<(watch::Sender<()>, watch::Receiver<()>), ctrlc::Error> {
    let (tx, rx) = watch::channel(());
    let signal_tx = tx.clone();
    ctrlc::set_handler(move || {
        log::info!("Termination signal received, stopping producer");
        if signal_tx.send(()).is_err() {
            log::debug!("No producer listening for shutdown");
        }
    })?;
    Ok((tx, rx))
}
