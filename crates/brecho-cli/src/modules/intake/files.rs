use brecho_core::Photo;
use serde::de::DeserializeOwned;
use std::path::Path;

pub(crate) fn read_photo(path: &Path) -> anyhow::Result<Photo> {
    let bytes = std::fs::read(path)
        .map_err(|err| anyhow::anyhow!("cannot read {}: {err}", path.display()))?;
    if bytes.is_empty() {
        anyhow::bail!("file is empty: {}", path.display());
    }
    let photo = Photo::new(bytes);
    Ok(match path.file_name().and_then(|name| name.to_str()) {
        Some(name) => photo.with_filename(name),
        None => photo,
    })
}

pub(crate) fn read_json_file<T: DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let contents = std::fs::read_to_string(path)
        .map_err(|err| anyhow::anyhow!("cannot read {}: {err}", path.display()))?;
    serde_json::from_str(&contents)
        .map_err(|err| anyhow::anyhow!("invalid JSON in {}: {err}", path.display()))
}

pub(crate) fn write_json_file(path: &Path, value: &serde_json::Value) -> anyhow::Result<()> {
    std::fs::write(path, serde_json::to_string_pretty(value)?)?;
    Ok(())
}
