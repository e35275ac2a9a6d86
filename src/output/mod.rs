use std::path::Path;

use anyhow::Result;

use crate::fetcher::PronunciationRecord;

/// Render a result set as pretty-printed JSON. `serde_json` leaves non-ASCII
/// characters unescaped, so Telugu script survives literally.
pub fn render_result_set(records: &[PronunciationRecord]) -> Result<String> {
    Ok(serde_json::to_string_pretty(records)?)
}

/// Save a result set to a file, UTF-8 encoded
pub async fn save_result_set(records: &[PronunciationRecord], path: &Path) -> Result<()> {
    let content = render_result_set(records)?;
    fs_err::write(path, content)?;
    Ok(())
}

/// Download-style filename embedding the generation timestamp
pub fn timestamped_filename() -> String {
    format!(
        "pronunciations_{}.json",
        chrono::Local::now().format("%Y%m%d_%H%M%S")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetcher::PronunciationResult;

    #[test]
    fn rendered_json_keeps_order_and_literal_telugu() {
        let records = vec![
            PronunciationRecord::Success(PronunciationResult {
                word: "toilet".to_string(),
                pronunciation: "TOy Luht".to_string(),
                pronunciation_telugu: "టాయ్ లహ్ట్".to_string(),
            }),
            PronunciationRecord::Success(PronunciationResult {
                word: "water".to_string(),
                pronunciation: "WAH tur".to_string(),
                pronunciation_telugu: "వా టర్".to_string(),
            }),
        ];

        let json = render_result_set(&records).unwrap();
        assert!(json.contains("టాయ్ లహ్ట్"));
        assert!(json.find("toilet").unwrap() < json.find("water").unwrap());
    }

    #[test]
    fn filename_embeds_a_timestamp() {
        let name = timestamped_filename();
        assert!(name.starts_with("pronunciations_"));
        assert!(name.ends_with(".json"));
        // pronunciations_YYYYMMDD_HHMMSS.json
        assert_eq!(name.len(), "pronunciations_".len() + 15 + ".json".len());
    }
}
