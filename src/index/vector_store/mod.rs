
use std::path::{Path, PathBuf};
use std::sync::Arc;

use arrow::array::{
    Array, FixedSizeListArray, Float32Array, RecordBatchIterator, StringArray, UInt32Array,
};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use futures::TryStreamExt;
use lancedb::query::{ExecutableQuery, QueryBase};
use tracing::{debug, info};
use uuid::Uuid;

use super::EmbeddingRecord;
use crate::{PdfChatError, Result};

const TABLE_NAME: &str = "chunks";

/// Vector index at a named directory location.
///
/// One ingestion owns the whole location: `build` replaces whatever was
/// persisted there before. Concurrent builds to the same location are
/// last-write-wins.
pub struct VectorStore {
    location: PathBuf,
}

/// A persisted index opened for searching
pub struct IndexHandle {
    table: lancedb::Table,
    dimension: usize,
}

/// One similarity search hit
#[derive(Debug, Clone, PartialEq)]
pub struct SearchResult {
    pub content: String,
    pub chunk_index: u32,
    pub distance: f32,
}

impl VectorStore {
    #[inline]
    pub fn new(location: impl Into<PathBuf>) -> Self {
        Self {
            location: location.into(),
        }
    }

    #[inline]
    pub fn location(&self) -> &Path {
        &self.location
    }

    /// Persist a full set of embedding records, replacing any prior index.
    ///
    /// The dataset is staged in a scratch directory and swapped into place
    /// only after every record has been written; a failure at any earlier
    /// point leaves a previously persisted index untouched.
    #[inline]
    pub async fn build(&self, records: Vec<EmbeddingRecord>) -> Result<()> {
        if records.is_empty() {
            return Err(PdfChatError::EmptyInput("no chunks to index".to_string()));
        }

        let dimension = records[0].vector.len();
        if dimension == 0 {
            return Err(PdfChatError::Embedding(
                "Embedding vectors must not be empty".to_string(),
            ));
        }
        if let Some(bad) = records.iter().find(|r| r.vector.len() != dimension) {
            return Err(PdfChatError::Embedding(format!(
                "Embedding dimension mismatch: expected {}, got {}",
                dimension,
                bad.vector.len()
            )));
        }

        debug!(
            "Building index with {} records at {}",
            records.len(),
            self.location.display()
        );

        if let Some(parent) = self.location.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let staging = self
            .location
            .with_extension(format!("staging-{}", Uuid::new_v4()));

        if let Err(e) = write_dataset(&staging, &records, dimension).await {
            let _ = std::fs::remove_dir_all(&staging);
            return Err(e);
        }

        if self.location.exists() {
            std::fs::remove_dir_all(&self.location)?;
        }
        std::fs::rename(&staging, &self.location)?;

        info!(
            "Persisted {} embeddings to {}",
            records.len(),
            self.location.display()
        );
        Ok(())
    }

    /// Open a previously persisted index for searching
    #[inline]
    pub async fn open(&self) -> Result<IndexHandle> {
        if !self.location.exists() {
            return Err(PdfChatError::IndexNotFound(
                self.location.display().to_string(),
            ));
        }

        let uri = format!("file://{}", self.location.display());
        let connection = lancedb::connect(&uri)
            .execute()
            .await
            .map_err(|e| PdfChatError::Index(format!("Failed to open index: {e}")))?;

        let table_names = connection
            .table_names()
            .execute()
            .await
            .map_err(|e| PdfChatError::Index(format!("Failed to list tables: {e}")))?;
        if !table_names.iter().any(|name| name == TABLE_NAME) {
            return Err(PdfChatError::IndexNotFound(
                self.location.display().to_string(),
            ));
        }

        let table = connection
            .open_table(TABLE_NAME)
            .execute()
            .await
            .map_err(|e| PdfChatError::Index(format!("Failed to open table: {e}")))?;

        let dimension = detect_vector_dimension(&table).await?;

        debug!(
            "Opened index at {} ({} dimensions)",
            self.location.display(),
            dimension
        );
        Ok(IndexHandle { table, dimension })
    }
}

impl IndexHandle {
    /// The embedding dimension this index was built with
    #[inline]
    pub fn dimension(&self) -> usize {
        self.dimension
    }

    /// Number of chunks stored in the index
    #[inline]
    pub async fn count(&self) -> Result<usize> {
        self.table
            .count_rows(None)
            .await
            .map_err(|e| PdfChatError::Index(format!("Failed to count rows: {e}")))
    }

    /// Return up to `k` chunks nearest to the query vector, ordered by
    /// ascending distance; equal distances fall back to insertion order.
    #[inline]
    pub async fn search(&self, query: &[f32], k: usize) -> Result<Vec<SearchResult>> {
        if k == 0 {
            return Err(PdfChatError::InvalidArgument(
                "k must be greater than zero".to_string(),
            ));
        }
        if query.len() != self.dimension {
            return Err(PdfChatError::Config(format!(
                "query embedding dimension {} does not match index dimension {}",
                query.len(),
                self.dimension
            )));
        }

        debug!("Searching for {} nearest chunks", k);

        let mut stream = self
            .table
            .vector_search(query)
            .map_err(|e| PdfChatError::Index(format!("Failed to create vector search: {e}")))?
            .column("vector")
            .limit(k)
            .execute()
            .await
            .map_err(|e| PdfChatError::Index(format!("Failed to execute search: {e}")))?;

        let mut results = Vec::new();
        while let Some(batch) = stream
            .try_next()
            .await
            .map_err(|e| PdfChatError::Index(format!("Failed to read result stream: {e}")))?
        {
            results.extend(parse_search_batch(&batch)?);
        }

        results.sort_by(|a, b| {
            a.distance
                .total_cmp(&b.distance)
                .then(a.chunk_index.cmp(&b.chunk_index))
        });
        results.truncate(k);

        debug!("Search returned {} results", results.len());
        Ok(results)
    }
}

async fn write_dataset(path: &Path, records: &[EmbeddingRecord], dimension: usize) -> Result<()> {
    let uri = format!("file://{}", path.display());
    let connection = lancedb::connect(&uri)
        .execute()
        .await
        .map_err(|e| PdfChatError::Index(format!("Failed to create index dataset: {e}")))?;

    let schema = index_schema(dimension);
    connection
        .create_empty_table(TABLE_NAME, Arc::clone(&schema))
        .execute()
        .await
        .map_err(|e| PdfChatError::Index(format!("Failed to create table: {e}")))?;

    let batch = create_record_batch(records, &schema, dimension)?;
    let table = connection
        .open_table(TABLE_NAME)
        .execute()
        .await
        .map_err(|e| PdfChatError::Index(format!("Failed to open staging table: {e}")))?;

    let reader = RecordBatchIterator::new(std::iter::once(Ok(batch)), schema);
    table
        .add(reader)
        .execute()
        .await
        .map_err(|e| PdfChatError::Index(format!("Failed to insert embeddings: {e}")))?;

    Ok(())
}

fn index_schema(dimension: usize) -> Arc<Schema> {
    Arc::new(Schema::new(vec![
        Field::new("id", DataType::Utf8, false),
        Field::new(
            "vector",
            DataType::FixedSizeList(
                Arc::new(Field::new("item", DataType::Float32, false)),
                dimension as i32,
            ),
            false,
        ),
        Field::new("content", DataType::Utf8, false),
        Field::new("chunk_index", DataType::UInt32, false),
        Field::new("created_at", DataType::Utf8, false),
    ]))
}

fn create_record_batch(
    records: &[EmbeddingRecord],
    schema: &Arc<Schema>,
    dimension: usize,
) -> Result<RecordBatch> {
    let len = records.len();
    let mut ids = Vec::with_capacity(len);
    let mut contents = Vec::with_capacity(len);
    let mut chunk_indices = Vec::with_capacity(len);
    let mut created_ats = Vec::with_capacity(len);
    let mut flat_values = Vec::with_capacity(len * dimension);

    for record in records {
        ids.push(record.id.as_str());
        contents.push(record.metadata.content.as_str());
        chunk_indices.push(record.metadata.chunk_index);
        created_ats.push(record.metadata.created_at.as_str());
        flat_values.extend_from_slice(&record.vector);
    }

    let values_array = Float32Array::from(flat_values);
    let field = Arc::new(Field::new("item", DataType::Float32, false));
    let vector_array =
        FixedSizeListArray::try_new(field, dimension as i32, Arc::new(values_array), None)
            .map_err(|e| PdfChatError::Index(format!("Failed to create vector array: {e}")))?;

    let arrays: Vec<Arc<dyn Array>> = vec![
        Arc::new(StringArray::from(ids)),
        Arc::new(vector_array),
        Arc::new(StringArray::from(contents)),
        Arc::new(UInt32Array::from(chunk_indices)),
        Arc::new(StringArray::from(created_ats)),
    ];

    RecordBatch::try_new(Arc::clone(schema), arrays)
        .map_err(|e| PdfChatError::Index(format!("Failed to create record batch: {e}")))
}

async fn detect_vector_dimension(table: &lancedb::Table) -> Result<usize> {
    let schema = table
        .schema()
        .await
        .map_err(|e| PdfChatError::Index(format!("Failed to get table schema: {e}")))?;

    for field in schema.fields() {
        if field.name() == "vector" {
            if let DataType::FixedSizeList(_, size) = field.data_type() {
                return Ok(*size as usize);
            }
        }
    }

    Err(PdfChatError::Index(
        "Could not find vector column or determine dimension".to_string(),
    ))
}

fn parse_search_batch(batch: &RecordBatch) -> Result<Vec<SearchResult>> {
    let contents = batch
        .column_by_name("content")
        .ok_or_else(|| PdfChatError::Index("Missing content column".to_string()))?
        .as_any()
        .downcast_ref::<StringArray>()
        .ok_or_else(|| PdfChatError::Index("Invalid content column type".to_string()))?;

    let chunk_indices = batch
        .column_by_name("chunk_index")
        .ok_or_else(|| PdfChatError::Index("Missing chunk_index column".to_string()))?
        .as_any()
        .downcast_ref::<UInt32Array>()
        .ok_or_else(|| PdfChatError::Index("Invalid chunk_index column type".to_string()))?;

    let distances = batch
        .column_by_name("_distance")
        .map(|col| col.as_any().downcast_ref::<Float32Array>());

    let mut results = Vec::with_capacity(batch.num_rows());
    for row in 0..batch.num_rows() {
        let distance = distances
            .flatten()
            .map_or(0.0, |d| if d.is_null(row) { 0.0 } else { d.value(row) });

        results.push(SearchResult {
            content: contents.value(row).to_string(),
            chunk_index: chunk_indices.value(row),
            distance,
        });
    }

    Ok(results)
}
