fn main() {
    // Exit status is 0 on every path, including a failed report
    if let Err(err) = devprobe_lib::run() {
        tracing::error!("{:#}", err);
    }
}
