//! Panel page generation
//!
//! Builds the single HTML page served by the panel. Markup is assembled
//! by hand; the page is plain and unstyled, which is all a maintenance
//! interface on a headless device needs. All record values are escaped
//! before insertion.

use chrono::{Local, LocalResult, TimeZone};

use crate::constants::DAY_NAMES;
use crate::models::{PowerMode, WifiConfig};

/// Outcome banner rendered above the status block
#[derive(Debug, Clone, PartialEq)]
pub enum Banner {
    None,
    Success(String),
    Error(&'static str),
}

/// Render the full panel page for the given record.
/// `now` is the request's unix timestamp, used for the disable status.
pub fn page(config: &WifiConfig, banner: &Banner, now: i64) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n");
    html.push_str("<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"UTF-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n");
    html.push_str("<title>WiFi Daemon Control Panel</title>\n");
    html.push_str("</head>\n<body>\n");
    html.push_str("<h1>WiFi Daemon Control Panel</h1>\n");

    match banner {
        Banner::None => {}
        Banner::Success(message) => {
            html.push_str(&format!("<p class=\"message\">{}</p>\n", escape(message)));
        }
        Banner::Error(message) => {
            html.push_str(&format!("<p class=\"error\">{}</p>\n", escape(message)));
        }
    }

    push_status(&mut html, config, now);
    push_power_mode_form(&mut html, config);
    push_disable_form(&mut html, config);
    push_schedule_form(&mut html, config);
    push_network_form(&mut html, config);
    push_system_form(&mut html, config);
    push_config_dump(&mut html, config);

    html.push_str("</body>\n</html>\n");
    html
}

fn push_status(html: &mut String, config: &WifiConfig, now: i64) {
    html.push_str("<section>\n<h3>Current Status</h3>\n");
    html.push_str(&format!(
        "<p><strong>Power Mode:</strong> {}</p>\n",
        config.power_mode.as_str()
    ));
    html.push_str(&format!(
        "<p><strong>Disabled Until:</strong> {}</p>\n",
        disabled_until_text(config, now)
    ));
    html.push_str(&format!(
        "<p><strong>Active Hours:</strong> {}:00 - {}:59</p>\n",
        config.start_hour, config.end_hour
    ));
    html.push_str("</section>\n");
}

/// "Active" outside a disable window, otherwise the local expiry time
fn disabled_until_text(config: &WifiConfig, now: i64) -> String {
    if !config.is_disabled_at(now) {
        return "Active".to_string();
    }
    match Local.timestamp_opt(config.disable_until, 0) {
        LocalResult::Single(expiry) => expiry.format("%Y-%m-%d %H:%M:%S").to_string(),
        _ => config.disable_until.to_string(),
    }
}

fn push_power_mode_form(html: &mut String, config: &WifiConfig) {
    html.push_str("<section>\n<h3>Power Mode</h3>\n<form method=\"post\">\n");
    html.push_str("<input type=\"hidden\" name=\"action\" value=\"update_power_mode\">\n");
    html.push_str("<label for=\"power_mode\">Power Mode:</label>\n");
    html.push_str("<select name=\"power_mode\" id=\"power_mode\">\n");
    for mode in [PowerMode::Normal, PowerMode::Eco, PowerMode::Aggressive] {
        let selected = if config.power_mode == mode { " selected" } else { "" };
        html.push_str(&format!(
            "<option value=\"{0}\"{1}>{0}</option>\n",
            mode.as_str(),
            selected
        ));
    }
    html.push_str("</select>\n");
    html.push_str("<button type=\"submit\">Update Power Mode</button>\n</form>\n</section>\n");
}

fn push_disable_form(html: &mut String, config: &WifiConfig) {
    // Pre-fill with the last requested length so repeat disables are one click
    let prefill = if config.disable_duration > 0 {
        config.disable_duration
    } else {
        60
    };

    html.push_str("<section>\n<h3>Temporary Disable</h3>\n<form method=\"post\">\n");
    html.push_str("<input type=\"hidden\" name=\"action\" value=\"disable_daemon\">\n");
    html.push_str("<label for=\"disable_duration\">Disable for (minutes):</label>\n");
    html.push_str(&format!(
        "<input type=\"number\" name=\"disable_duration\" id=\"disable_duration\" min=\"1\" max=\"1440\" value=\"{}\">\n",
        prefill
    ));
    html.push_str("<button type=\"submit\">Disable Daemon</button>\n</form>\n</section>\n");
}

fn push_schedule_form(html: &mut String, config: &WifiConfig) {
    html.push_str("<section>\n<h3>Schedule Settings</h3>\n<form method=\"post\">\n");
    html.push_str("<input type=\"hidden\" name=\"action\" value=\"update_schedule\">\n");
    html.push_str("<label for=\"start_hour\">Start Hour (0-23):</label>\n");
    html.push_str(&format!(
        "<input type=\"number\" name=\"start_hour\" id=\"start_hour\" min=\"0\" max=\"23\" value=\"{}\">\n",
        config.start_hour
    ));
    html.push_str("<label for=\"end_hour\">End Hour (0-23):</label>\n");
    html.push_str(&format!(
        "<input type=\"number\" name=\"end_hour\" id=\"end_hour\" min=\"0\" max=\"23\" value=\"{}\">\n",
        config.end_hour
    ));
    html.push_str("<p>Active Days:</p>\n");
    for (i, name) in DAY_NAMES.iter().enumerate() {
        let checked = if config.active_days[i] != 0 { " checked" } else { "" };
        html.push_str(&format!(
            "<input type=\"checkbox\" name=\"day_{0}\" id=\"day_{0}\"{1}><label for=\"day_{0}\">{2}</label>\n",
            i, checked, name
        ));
    }
    html.push_str("<button type=\"submit\">Update Schedule</button>\n</form>\n</section>\n");
}

fn push_network_form(html: &mut String, config: &WifiConfig) {
    html.push_str("<section>\n<h3>Network Settings</h3>\n<form method=\"post\">\n");
    html.push_str("<input type=\"hidden\" name=\"action\" value=\"update_network\">\n");
    push_text_input(html, "ssid", "WiFi SSID:", "text", &config.ssid);
    push_text_input(html, "password", "WiFi Password:", "password", &config.password);
    push_text_input(html, "static_ip", "Static IP:", "text", &config.static_ip);
    push_text_input(html, "gateway", "Gateway:", "text", &config.gateway);
    push_text_input(html, "dns", "DNS Server:", "text", &config.dns);
    html.push_str("<button type=\"submit\">Update Network Settings</button>\n</form>\n</section>\n");
}

fn push_system_form(html: &mut String, config: &WifiConfig) {
    html.push_str("<section>\n<h3>System Settings</h3>\n<form method=\"post\">\n");
    html.push_str("<input type=\"hidden\" name=\"action\" value=\"update_system\">\n");
    html.push_str("<label for=\"check_interval\">Check Interval (seconds):</label>\n");
    html.push_str(&format!(
        "<input type=\"number\" name=\"check_interval\" id=\"check_interval\" min=\"5\" max=\"300\" value=\"{}\">\n",
        config.check_interval
    ));
    html.push_str("<label for=\"min_battery\">Minimum Battery (%):</label>\n");
    html.push_str(&format!(
        "<input type=\"number\" name=\"min_battery\" id=\"min_battery\" min=\"0\" max=\"100\" value=\"{}\">\n",
        config.min_battery
    ));
    html.push_str("<label for=\"max_temp\">Maximum Temperature (milli&deg;C):</label>\n");
    html.push_str(&format!(
        "<input type=\"number\" name=\"max_temp\" id=\"max_temp\" min=\"0\" max=\"100000\" value=\"{}\">\n",
        config.max_temp
    ));
    html.push_str("<button type=\"submit\">Update System Settings</button>\n</form>\n</section>\n");
}

fn push_text_input(html: &mut String, name: &str, label: &str, kind: &str, value: &str) {
    html.push_str(&format!("<label for=\"{}\">{}</label>\n", name, label));
    html.push_str(&format!(
        "<input type=\"{0}\" name=\"{1}\" id=\"{1}\" value=\"{2}\">\n",
        kind,
        name,
        escape(value)
    ));
}

fn push_config_dump(html: &mut String, config: &WifiConfig) {
    let json = serde_json::to_string_pretty(config).unwrap_or_default();
    html.push_str("<section>\n<h3>Current Configuration (JSON)</h3>\n");
    html.push_str(&format!(
        "<textarea rows=\"15\" cols=\"60\" readonly>{}</textarea>\n",
        escape(&json)
    ));
    html.push_str("</section>\n");
}

/// Minimal HTML escaping for record values echoed into the page
fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
