use log_context::{LogConfig, LogContext};

fn main() {
    let log = LogContext::initialized(LogConfig {
        logs_directory: "logs".into(),
        levels: "All".into(),
        uid: "demo-7f3a".into(),
        name: "service-logging-demo".into(),
        service: "demo".into(),
    });

    log.trace("handling request 1");
    log.debug("cache warmed in 12ms");
    log.info("demo service started");
    log.warning("queue depth above expected range");

    let cause = std::io::Error::other("connection refused");
    log.error(Some(&cause), "upstream unreachable");

    if let Some(path) = log.log_path() {
        println!("records written to {}", path.display());
    }

    // Enabling this line would write a Fatal record and exit the process:
    // log.fatal(Some(&cause), "giving up");
}
