//! CSV rendering of applications for producer review. Uses the `csv` crate for quoting.

use crate::domain::Application;

pub const APPLICATIONS_HEADER: [&str; 12] = [
    "Id",
    "Casting",
    "Role",
    "Name",
    "Email",
    "Submitted",
    "Experience",
    "Availability",
    "Photos",
    "Video",
    "Portfolio",
    "Message",
];

fn flatten(text: &str) -> String {
    text.replace('\n', " ").replace('\r', "")
}

/// Convert applications to a semicolon-delimited CSV string with a header row.
///
/// Photo file names are joined with `|`; free text has its line breaks flattened.
pub fn applications_to_csv(applications: &[Application]) -> Result<String, csv::Error> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .has_headers(true)
        .from_writer(Vec::new());

    wtr.write_record(APPLICATIONS_HEADER)?;

    for app in applications {
        let submitted = app.submitted_at.format("%Y-%m-%d %H:%M").to_string();
        let casting = app.casting_id.to_string();
        let photos = app.photo_files.join("|");
        let experience = flatten(&app.experience);
        let availability = flatten(&app.availability);
        let message = flatten(&app.cover_message);

        wtr.write_record([
            app.id.as_str(),
            casting.as_str(),
            app.role_id.as_str(),
            app.applicant_name.as_str(),
            app.applicant_email.as_str(),
            submitted.as_str(),
            experience.as_str(),
            availability.as_str(),
            photos.as_str(),
            app.video_showreel.as_deref().unwrap_or(""),
            app.portfolio_file.as_deref().unwrap_or(""),
            message.as_str(),
        ])?;
    }

    wtr.flush()?;
    let bytes = wtr
        .into_inner()
        .map_err(|e| csv::Error::from(std::io::Error::other(e.to_string())))?;

    String::from_utf8(bytes).map_err(|e| {
        csv::Error::from(std::io::Error::new(
            std::io::ErrorKind::InvalidData,
            e.to_string(),
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn app(message: &str) -> Application {
        Application {
            id: "app-1704067200000-1".to_string(),
            casting_id: 1,
            role_id: "role-1-1".to_string(),
            applicant_name: "Amira Ben Salah".to_string(),
            applicant_email: "talent@demo.tn".to_string(),
            cover_message: message.to_string(),
            experience: "5 years".to_string(),
            availability: "Immediately".to_string(),
            photo_files: vec!["face.jpg".to_string(), "profile.jpg".to_string()],
            video_showreel: Some("reel.mp4".to_string()),
            portfolio_file: None,
            submitted_at: Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap(),
        }
    }

    #[test]
    fn test_applications_to_csv_basic() {
        let csv = applications_to_csv(&[app("Hello")]).unwrap();
        let mut lines = csv.lines();
        assert_eq!(
            lines.next(),
            Some(
                "Id;Casting;Role;Name;Email;Submitted;Experience;Availability;\
                 Photos;Video;Portfolio;Message"
            )
        );
        assert_eq!(
            lines.next(),
            Some(
                "app-1704067200000-1;1;role-1-1;Amira Ben Salah;talent@demo.tn;\
                 2024-01-01 09:30;5 years;Immediately;face.jpg|profile.jpg;reel.mp4;;Hello"
            )
        );
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn test_applications_to_csv_special_chars() {
        let csv = applications_to_csv(&[app("Hi; I \"love\"\ntheater")]).unwrap();
        assert_eq!(csv.lines().count(), 2);
        assert!(csv.contains("\"Hi; I \"\"love\"\" theater\""));
    }

    #[test]
    fn test_applications_to_csv_keeps_experience_and_availability() {
        let multi_line = Application {
            experience: "Theatre\nShort films".to_string(),
            availability: "Weekends only".to_string(),
            ..app("Hello")
        };
        let csv = applications_to_csv(&[multi_line]).unwrap();
        let row = csv.lines().nth(1).unwrap();
        let fields: Vec<&str> = row.split(';').collect();
        assert_eq!(fields.len(), APPLICATIONS_HEADER.len());
        assert_eq!(fields[6], "Theatre Short films");
        assert_eq!(fields[7], "Weekends only");
    }

    #[test]
    fn test_applications_to_csv_empty_is_header_only() {
        let csv = applications_to_csv(&[]).unwrap();
        assert_eq!(csv.lines().count(), 1);
    }
}
