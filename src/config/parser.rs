use super::settings::AppConfig;

fn parse_into<T: std::str::FromStr>(value: &str, slot: &mut T) {
    if let Ok(v) = value.parse() {
        *slot = v;
    }
}

fn parse_flag(value: &str) -> bool {
    value == "yes" || value == "true" || value == "1"
}

impl AppConfig {
    /// Parse the simple KEY="VALUE" config format.
    pub fn parse_ini(&mut self, contents: &str) {
        for line in contents.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let Some((key, value)) = line.split_once('=') else {
                continue;
            };
            let key = key.trim();
            let value = value.trim().trim_matches('"');
            let balance = &mut self.balance;

            match key {
                "CLUSTER_NAME" => self.cluster_name = value.to_string(),
                "TOPOLOGY_PATH" => self.topology_path = value.to_string(),
                "REFRESH_INTERVAL_SECS" => parse_into(value, &mut self.refresh_interval_secs),
                "BALANCE_LOAD_SCORE_THRESHOLD" => {
                    parse_into(value, &mut balance.load_score_threshold);
                }
                "CAPACITY_WEIGHT" => parse_into(value, &mut balance.capacity_weight),
                "REPLICA_WEIGHT" => parse_into(value, &mut balance.replica_weight),
                "ADAPTIVE_CAPACITY_WEIGHT" => balance.adaptive_capacity_weight = parse_flag(value),
                "CAPACITY_USED_PERCENT_HIGH_WATER" => {
                    parse_into(value, &mut balance.capacity_used_percent_high_water);
                }
                "STORAGE_HIGH_WATERMARK_USAGE_PERCENT" => {
                    parse_into(value, &mut balance.storage_high_watermark_usage_percent);
                }
                "STORAGE_MIN_LEFT_CAPACITY_BYTES" => {
                    parse_into(value, &mut balance.storage_min_left_capacity_bytes);
                }
                "STORAGE_FLOOD_STAGE_USAGE_PERCENT" => {
                    parse_into(value, &mut balance.storage_flood_stage_usage_percent);
                }
                "STORAGE_FLOOD_STAGE_LEFT_CAPACITY_BYTES" => {
                    parse_into(value, &mut balance.storage_flood_stage_left_capacity_bytes);
                }
                "MAX_DISK_REPORT_AGE_SECS" => {
                    parse_into(value, &mut balance.max_disk_report_age_secs);
                }
                _ => {} // Ignore unknown keys
            }
        }
    }
}
