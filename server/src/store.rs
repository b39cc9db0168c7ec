use std::path::{Path, PathBuf};
use std::sync::RwLock;

use futures::future::{BoxFuture, FutureExt};

use crate::errors::BackendError;
use crate::review::Review;

pub mod mock;

pub trait ReviewStore {
    /// Returns a copy of every stored review, in insertion order.
    fn snapshot(&self) -> Vec<Review>;

    /// Returns the number of stored reviews.
    fn count(&self) -> usize;

    /// Adds one review and durably persists the full data set before
    /// resolving.
    fn append(&self, review: Review) -> BoxFuture<Result<(), BackendError>>;
}

/// A store backed by a single CSV file with a
/// `ReviewId,ReviewBody,Location,Timestamp` header row.
///
/// Appending rewrites the entire file. That is the contract of the
/// backing format and a known scalability limit for large data sets; an
/// incremental log would slot in behind the same trait.
pub struct CsvStore {
    path: PathBuf,
    reviews: RwLock<Vec<Review>>,
}

impl CsvStore {
    /// Reads the entire backing file into memory. A missing or
    /// malformed file is an error, which startup treats as fatal.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, BackendError> {
        let path = path.as_ref().to_owned();

        let mut reader = csv::Reader::from_path(&path)?;
        let reviews = reader
            .deserialize()
            .collect::<Result<Vec<Review>, csv::Error>>()?;

        Ok(CsvStore {
            path,
            reviews: RwLock::new(reviews),
        })
    }
}

impl ReviewStore for CsvStore {
    fn snapshot(&self) -> Vec<Review> {
        self.reviews.read().unwrap().clone()
    }

    fn count(&self) -> usize {
        self.reviews.read().unwrap().len()
    }

    fn append(&self, review: Review) -> BoxFuture<Result<(), BackendError>> {
        append(self, review).boxed()
    }
}

async fn append(store: &CsvStore, review: Review) -> Result<(), BackendError> {
    // The write guard is held across the whole read-modify-persist step
    // so concurrent appends cannot interleave.
    let mut reviews = store.reviews.write().unwrap();

    let mut next = reviews.clone();
    next.push(review);

    write_all(&store.path, &next)?;
    *reviews = next;

    Ok(())
}

// The rewrite goes through a scratch file in the same directory, renamed
// over the original once flushed. A failed write leaves the existing
// data untouched.
fn write_all(path: &Path, reviews: &[Review]) -> Result<(), BackendError> {
    let directory = path.parent().unwrap_or_else(|| Path::new("."));
    let scratch = tempfile::NamedTempFile::new_in(directory)?;

    {
        let mut writer = csv::Writer::from_writer(scratch.as_file());

        for review in reviews {
            writer.serialize(review)?;
        }

        writer.flush()?;
    }

    scratch
        .persist(path)
        .map_err(|e| BackendError::Io { source: e.error })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    const HEADER: &str = "ReviewId,ReviewBody,Location,Timestamp\n";

    fn temp_csv(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(contents.as_bytes()).expect("seed temp file");
        file.flush().expect("flush temp file");
        file
    }

    fn review(body: &str, location: &str) -> Review {
        Review::new(body.to_owned(), location.to_owned())
    }

    #[test]
    fn loads_seeded_rows_in_order() {
        let file = temp_csv(&format!(
            "{}{}\n{}\n",
            HEADER,
            "a,Loved it,\"Denver, Colorado\",2024-01-01 09:00:00",
            "b,Hated it,\"Mesa, Arizona\",2024-01-02 09:00:00",
        ));

        let store = CsvStore::load(file.path()).expect("load store");
        let reviews = store.snapshot();

        assert_eq!(store.count(), 2);
        assert_eq!(reviews[0].id, "a");
        assert_eq!(reviews[0].location, "Denver, Colorado");
        assert_eq!(reviews[1].id, "b");
        assert_eq!(reviews[1].timestamp, "2024-01-02 09:00:00");
    }

    #[test]
    fn load_fails_on_missing_file() {
        assert!(CsvStore::load("/nonexistent/reviews.csv").is_err());
    }

    #[tokio::test]
    async fn append_then_reload_round_trips() {
        let file = temp_csv(HEADER);
        let store = CsvStore::load(file.path()).expect("load empty store");

        let first = review("Great tacos, would return.", "San Diego, California");
        let second = review("Too crowded, mediocre service.", "Las Vegas, Nevada");

        store.append(first.clone()).await.expect("append first");
        store.append(second.clone()).await.expect("append second");
        assert_eq!(store.count(), 2);

        let reloaded = CsvStore::load(file.path()).expect("reload store");
        assert_eq!(reloaded.snapshot(), vec![first, second]);
    }

    #[tokio::test]
    async fn append_preserves_commas_and_quotes() {
        let file = temp_csv(HEADER);
        let store = CsvStore::load(file.path()).expect("load empty store");

        let tricky = review(
            "Good \"value\", but loud,\nvery loud.",
            "El Paso, Texas",
        );
        store.append(tricky.clone()).await.expect("append");

        let reloaded = CsvStore::load(file.path()).expect("reload store");
        assert_eq!(reloaded.snapshot(), vec![tricky]);
    }
}
