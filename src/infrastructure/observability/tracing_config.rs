/// Configuration for tracing initialization.
pub struct TracingConfig {
    pub environment: String,
    pub json_format: bool,
}

impl TracingConfig {
    pub fn new(environment: String, json_format: bool) -> Self {
        Self {
            environment,
            json_format,
        }
    }
}
