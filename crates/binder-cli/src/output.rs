use serde::Serialize;

#[derive(Serialize)]
pub struct CliResponse<T: Serialize> {
    pub success: bool,
    pub api_version: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct ListResponse<T: Serialize> {
    pub items: Vec<T>,
    pub count: usize,
}

fn failure(message: &str) -> String {
    let response: CliResponse<()> = CliResponse {
        success: false,
        api_version: env!("CARGO_PKG_VERSION"),
        data: None,
        error: Some(message.to_string()),
    };
    serde_json::to_string(&response).unwrap_or_else(|_| r#"{"success":false}"#.to_string())
}

pub fn output_success<T: Serialize>(data: T) -> anyhow::Result<()> {
    let response = CliResponse {
        success: true,
        api_version: env!("CARGO_PKG_VERSION"),
        data: Some(data),
        error: None,
    };
    println!("{}", serde_json::to_string(&response)?);
    Ok(())
}

pub fn output_list<T: Serialize>(items: Vec<T>) -> anyhow::Result<()> {
    let count = items.len();
    let list = ListResponse { items, count };
    output_success(list)
}

/// Reports an alert on stderr without stopping the command.
pub fn output_alert(message: &str) {
    eprintln!("{}", failure(message));
}

/// Outputs an error response to stderr and exits with code 1.
pub fn output_error(message: &str) -> ! {
    eprintln!("{}", failure(message));
    std::process::exit(1);
}
