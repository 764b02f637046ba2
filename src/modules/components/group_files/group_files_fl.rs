use std::collections::BTreeMap;

use regex::Regex;

lazy_static::lazy_static! {
    // Firmware prefix, optional 2-digit chapter, 4-digit session
    static ref GOPRO_NAME: Regex =
        Regex::new(r"(?i)^(?:GX|GH|GP|GOPR|GPAA|GPBB)(\d{2})?(\d{4})\.MP4$").unwrap();
}

/// A camera filename split into its chapter and session parts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipName {
    pub file_name: String,
    /// `None` for single-file recordings such as `GOPR0099.MP4`
    pub chapter: Option<u8>,
    pub session: String,
}

impl ClipName {
    pub fn parse(file_name: &str) -> Option<Self> {
        let caps = GOPRO_NAME.captures(file_name)?;
        let chapter = match caps.get(1) {
            Some(m) => Some(m.as_str().parse().ok()?),
            None => None,
        };

        Some(Self {
            file_name: file_name.to_string(),
            chapter,
            session: caps[2].to_string(),
        })
    }

    /// Playback order within a session: un-chaptered first, then by chapter,
    /// then by name.
    fn sort_key(&self) -> (u8, &str) {
        (self.chapter.unwrap_or(0), &self.file_name)
    }
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GroupedFiles {
    /// Session id to filenames in playback order
    pub sessions: BTreeMap<String, Vec<String>>,
    /// Names that do not look like camera recordings
    pub skipped: Vec<String>,
}

/// Group camera filenames by session and order each session for playback.
pub fn group_gopro_files<S: AsRef<str>>(file_names: &[S]) -> GroupedFiles {
    let mut clips: BTreeMap<String, Vec<ClipName>> = BTreeMap::new();
    let mut skipped = Vec::new();

    for name in file_names {
        let name = name.as_ref();
        match ClipName::parse(name) {
            Some(clip) => clips.entry(clip.session.clone()).or_default().push(clip),
            None => {
                log::warn!("Skipping invalid filename: {}", name);
                skipped.push(name.to_string());
            }
        }
    }

    let sessions = clips
        .into_iter()
        .map(|(session, mut group)| {
            group.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
            let names = group.into_iter().map(|clip| clip.file_name).collect();
            (session, names)
        })
        .collect();

    GroupedFiles { sessions, skipped }
}
