#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AudioFormat {
    M4a,
    Mp3,
    Wav,
    Mpeg,
    Mpga,
    Ogg,
    Webm,
}

impl AudioFormat {
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_lowercase().as_str() {
            "m4a" => Some(Self::M4a),
            "mp3" => Some(Self::Mp3),
            "wav" => Some(Self::Wav),
            "mpeg" => Some(Self::Mpeg),
            "mpga" => Some(Self::Mpga),
            "ogg" => Some(Self::Ogg),
            "webm" => Some(Self::Webm),
            _ => None,
        }
    }

    pub fn as_mime(&self) -> &'static str {
        match self {
            Self::M4a => "audio/mp4",
            Self::Mp3 | Self::Mpeg | Self::Mpga => "audio/mpeg",
            Self::Wav => "audio/wav",
            Self::Ogg => "audio/ogg",
            Self::Webm => "audio/webm",
        }
    }
}

/// Lowercased extension of `filename`, including the leading dot, or an
/// empty string when there is none.
pub fn file_extension(filename: &str) -> String {
    let name = filename.rsplit(['/', '\\']).next().unwrap_or(filename);
    match name.rfind('.') {
        Some(idx) if idx > 0 => name[idx..].to_lowercase(),
        _ => String::new(),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub filename: String,
    pub format: AudioFormat,
    pub data: Vec<u8>,
}

impl AudioClip {
    /// Builds a clip from an upload, rejecting extensions outside the
    /// supported set. The error carries the offending extension.
    pub fn from_upload(filename: impl Into<String>, data: Vec<u8>) -> Result<Self, String> {
        let filename = filename.into();
        let ext = file_extension(&filename);
        let format = AudioFormat::from_extension(&ext).ok_or(ext)?;
        Ok(Self {
            filename,
            format,
            data,
        })
    }

    pub fn size_bytes(&self) -> usize {
        self.data.len()
    }
}
