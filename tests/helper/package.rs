//! Fixture packages for pipeline tests

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

use rusqlite::Connection;
use tempfile::TempDir;
use zip::write::SimpleFileOptions;
use zip::{ZipArchive, ZipWriter};

/// Temporary directory holding a package file and a scratch directory
pub struct PackageFixture {
    pub temp_dir: TempDir,
    pub archive_path: PathBuf,
}

impl PackageFixture {
    /// Package named `App.mpk` with the given database files and extra entries.
    pub fn new(databases: &[(&str, &str, &str)], extra: &[(&str, &[u8])]) -> Self {
        let temp_dir = TempDir::new().unwrap();
        let archive_path = temp_dir.path().join("App.mpk");

        let mut zip = ZipWriter::new(File::create(&archive_path).unwrap());
        for (name, product, build) in databases {
            let bytes = database_bytes(temp_dir.path(), product, build);
            zip.start_file(*name, SimpleFileOptions::default()).unwrap();
            zip.write_all(&bytes).unwrap();
        }
        for (name, content) in extra {
            if name.ends_with('/') {
                zip.add_directory(*name, SimpleFileOptions::default())
                    .unwrap();
            } else {
                zip.start_file(*name, SimpleFileOptions::default()).unwrap();
                zip.write_all(content).unwrap();
            }
        }
        zip.finish().unwrap();

        Self {
            temp_dir,
            archive_path,
        }
    }

    /// Package with a single `App.mpr` database.
    pub fn single(product: &str, build: &str) -> Self {
        Self::new(&[("App.mpr", product, build)], &[])
    }

    pub fn dir(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn scratch_dir(&self) -> PathBuf {
        self.temp_dir.path().join("scratch")
    }

    /// Names of all files next to the package, sorted
    pub fn sibling_files(&self) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(self.dir())
            .unwrap()
            .map(|e| e.unwrap())
            .filter(|e| e.file_type().unwrap().is_file())
            .map(|e| e.file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

fn database_bytes(dir: &Path, product: &str, build: &str) -> Vec<u8> {
    let db = dir.join("fixture-db.tmp");
    let conn = Connection::open(&db).unwrap();
    conn.execute(
        "CREATE TABLE _MetaData (_ProductVersion TEXT, _BuildVersion TEXT, _SchemaHash TEXT)",
        [],
    )
    .unwrap();
    conn.execute(
        "INSERT INTO _MetaData VALUES (?1, ?2, 'hash')",
        (product, build),
    )
    .unwrap();
    drop(conn);

    let bytes = fs::read(&db).unwrap();
    fs::remove_file(&db).unwrap();
    bytes
}

/// All entries of a zip file: name -> contents (empty for directories)
pub fn read_zip_entries(path: &Path) -> BTreeMap<String, Vec<u8>> {
    let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
    let mut entries = BTreeMap::new();
    for i in 0..archive.len() {
        let mut entry = archive.by_index(i).unwrap();
        let mut content = Vec::new();
        entry.read_to_end(&mut content).unwrap();
        entries.insert(entry.name().to_string(), content);
    }
    entries
}
