//! Plain-text bone name lists, one name per line

use std::fs::{self, File};
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use super::RigError;

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> RigError + '_ {
    move |source| RigError::Io { path: path.to_path_buf(), source }
}

/// Collect bone names mentioned in a source file
///
/// Every line containing `bone` contributes its second whitespace-separated
/// token. Lines with a single token are skipped.
pub fn discover_bone_names<R: BufRead>(reader: R) -> std::io::Result<Vec<String>> {
    let mut bones = Vec::new();
    for line in reader.lines() {
        let line = line?;
        if !line.contains("bone") {
            continue;
        }
        if let Some(name) = line.split_whitespace().nth(1) {
            bones.push(name.to_string());
        }
    }
    Ok(bones)
}

/// Collect bone names mentioned in the file at `path`
pub fn discover_bone_names_in_file(path: &Path) -> Result<Vec<String>, RigError> {
    let file = File::open(path).map_err(io_error(path))?;
    discover_bone_names(BufReader::new(file)).map_err(io_error(path))
}

/// Read a bone list, skipping blank lines
pub fn read_bone_names(path: &Path) -> Result<Vec<String>, RigError> {
    let contents = fs::read_to_string(path).map_err(io_error(path))?;
    Ok(contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Write a bone list, one name per line
pub fn write_bone_names(path: &Path, bones: &[String]) -> Result<(), RigError> {
    let file = File::create(path).map_err(io_error(path))?;
    let mut writer = BufWriter::new(file);
    for bone in bones {
        writeln!(writer, "{bone}").map_err(io_error(path))?;
    }
    writer.flush().map_err(io_error(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discover_second_token() {
        let text = "# bones\nbone mixamorig:Hips 0\nv 0 0 0\njoint_bone Spine\nbone\n";
        let bones = discover_bone_names(text.as_bytes()).unwrap();
        assert_eq!(bones, vec!["bones".to_string(), "mixamorig:Hips".to_string(), "Spine".to_string()]);
    }

    #[test]
    fn test_discover_nothing_in_plain_mesh() {
        let text = "v 0 0 0\nv 1 0 0\nv 0 1 0\nf 1 2 3\n";
        assert!(discover_bone_names(text.as_bytes()).unwrap().is_empty());
    }

    #[test]
    fn test_list_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bones.ini");
        let bones = vec!["mixamorig:Hips".to_string(), "mixamorig:Spine".to_string()];

        write_bone_names(&path, &bones).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "mixamorig:Hips\nmixamorig:Spine\n");
        assert_eq!(read_bone_names(&path).unwrap(), bones);
    }

    #[test]
    fn test_read_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bones.ini");
        fs::write(&path, "  mPelvis  \n\nmTorso\r\n").unwrap();
        assert_eq!(read_bone_names(&path).unwrap(), vec!["mPelvis".to_string(), "mTorso".to_string()]);
    }

    #[test]
    fn test_missing_list_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = read_bone_names(&dir.path().join("none.ini"));
        assert!(matches!(result, Err(RigError::Io { .. })));
    }
}
