/// Log an error together with its whole source chain at error level.
#[macro_export]
macro_rules! tracing_report {
    ($error:expr) => {
        tracing::error!(err = %snafu::Report::from_error(&$error));
    };
    ($error:expr, $message:expr) => {
        let whatever_error = <snafu::Whatever as snafu::FromString>::with_source(
            Box::new($error),
            $message.to_string(),
        );
        tracing::error!(err = %snafu::Report::from_error(whatever_error));
    };
}
