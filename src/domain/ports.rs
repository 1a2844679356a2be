use crate::utils::error::Result;

/// Where submitted drawings and the CSV log end up. Local disk in
/// production; an in-memory map in tests.
pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    /// Append to a file, creating it first if needed. The submission log
    /// only ever grows; rows are never rewritten.
    fn append_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
    fn file_exists(&self, path: &str) -> impl std::future::Future<Output = Result<bool>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    /// Path to the reference silhouette image, loaded once at startup.
    fn reference_path(&self) -> &str;
    /// Directory receiving submitted drawing files.
    fn output_dir(&self) -> &str;
    /// Submission log filename, relative to the output directory.
    fn log_filename(&self) -> &str;
}
