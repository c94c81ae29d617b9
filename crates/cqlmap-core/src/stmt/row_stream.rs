use super::Row;

use std::{
    collections::VecDeque,
    fmt,
    pin::Pin,
    task::{Context, Poll},
};
use tokio_stream::{Stream, StreamExt};

/// Rows of one response page.
///
/// Buffered rows are yielded first, then whatever the executor's stream
/// produces.
#[derive(Default)]
pub struct RowStream {
    buffer: VecDeque<Row>,
    stream: Option<DynStream>,
}

type DynStream = Pin<Box<dyn Stream<Item = crate::Result<Row>> + Send + 'static>>;

impl RowStream {
    pub fn from_vec(rows: Vec<Row>) -> RowStream {
        RowStream {
            buffer: rows.into(),
            stream: None,
        }
    }

    /// Rows produced lazily by the executor.
    pub fn from_stream<S>(stream: S) -> RowStream
    where
        S: Stream<Item = crate::Result<Row>> + Send + 'static,
    {
        RowStream {
            buffer: VecDeque::new(),
            stream: Some(Box::pin(stream)),
        }
    }

    pub async fn next(&mut self) -> Option<crate::Result<Row>> {
        StreamExt::next(self).await
    }

    /// Drains the stream, failing on the first row error.
    pub async fn collect(mut self) -> crate::Result<Vec<Row>> {
        let (low, _) = self.size_hint();
        let mut ret = Vec::with_capacity(low);

        while let Some(row) = self.next().await {
            ret.push(row?);
        }

        Ok(ret)
    }
}

impl Stream for RowStream {
    type Item = crate::Result<Row>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if let Some(row) = self.buffer.pop_front() {
            return Poll::Ready(Some(Ok(row)));
        }

        match self.stream.as_mut() {
            Some(stream) => stream.as_mut().poll_next(cx),
            None => Poll::Ready(None),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let buffered = self.buffer.len();

        match &self.stream {
            Some(stream) => {
                let (low, high) = stream.size_hint();
                (low + buffered, high.map(|high| high + buffered))
            }
            None => (buffered, Some(buffered)),
        }
    }
}

impl From<Vec<Row>> for RowStream {
    fn from(rows: Vec<Row>) -> RowStream {
        RowStream::from_vec(rows)
    }
}

impl fmt::Debug for RowStream {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RowStream")
            .field("buffered", &self.buffer.len())
            .field("streaming", &self.stream.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{err, stmt::Value};

    fn row(n: i32) -> Row {
        Row::from(vec![Value::Int(n)])
    }

    #[tokio::test]
    async fn buffered_rows() {
        let rows = RowStream::from_vec(vec![row(1), row(2)]);
        assert_eq!(rows.size_hint(), (2, Some(2)));
        assert_eq!(rows.collect().await.unwrap(), [row(1), row(2)]);
    }

    #[tokio::test]
    async fn streamed_rows_stop_at_the_first_error() {
        let items = vec![Ok(row(1)), Err(err!("connection reset")), Ok(row(3))];
        let mut rows = RowStream::from_stream(tokio_stream::iter(items));

        assert_eq!(rows.next().await.unwrap().unwrap(), row(1));
        assert!(rows.next().await.unwrap().is_err());

        let items = vec![Ok(row(1)), Err(err!("connection reset"))];
        let err = RowStream::from_stream(tokio_stream::iter(items))
            .collect()
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "connection reset");
    }
}
