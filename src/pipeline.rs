//! Masker builder and transform methods.
//!
//! A run buffers the head of the input up to the end of the sample window,
//! classifies the columns from it, then streams every line through the
//! engine. Only data and header lines are held back, so memory stays bounded
//! by the sample window and the header range, whatever the input size.

use std::borrow::Cow;
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, BufWriter, Cursor, Read, Write};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::Serialize;

use crate::classify::{ColumnTypes, classify_with_limit};
use crate::encoding::{EncodingInfo, detect_encoding};
use crate::engine::{Engine, SubstitutionRatios};
use crate::error::{MaskError, Result};
use crate::layout::LayoutDescriptor;
use crate::sample::Sampling;

/// Default number of (original, masked) rows kept for display.
pub const DEFAULT_PREVIEW_ROWS: usize = 20;

/// Bytes read from a file to sniff its encoding.
const ENCODING_SNIFF_BYTES: u64 = 64 * 1024;

/// One data row before and after masking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PreviewRow {
    pub original: String,
    pub masked: String,
}

/// Summary of a masking run.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MaskReport {
    /// Type assigned to each column.
    pub column_types: ColumnTypes,
    /// First data rows paired with their masked form.
    pub preview: Vec<PreviewRow>,
    /// Header lines copied verbatim.
    pub header_lines: usize,
    /// Data rows masked and written.
    pub data_rows: usize,
    /// Lines dropped: before the data start, or blank.
    pub skipped_lines: usize,
    /// Values written unmasked because their transform failed.
    pub pass_through: usize,
    /// Distinct (value, type) pairs masked.
    pub distinct_values: usize,
    /// Encoding of the input, when read from a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub encoding: Option<&'static str>,
}

/// Masks the data rows of delimited text described by a [`LayoutDescriptor`].
///
/// # Example
///
/// ```no_run
/// use csv_mask::{LayoutDescriptor, Masker, Separator};
///
/// let layout = LayoutDescriptor::new(Separator::Pipe, 1).with_header(0, 0);
/// let mut masker = Masker::new(layout);
/// masker.preview_rows(5);
///
/// let report = masker.transform_path("clientes.txt", "output/ANON_clientes.txt").unwrap();
/// println!("Types: {}", report.column_types);
/// ```
#[derive(Debug, Clone)]
pub struct Masker {
    /// Where header and data live.
    layout: LayoutDescriptor,
    /// Sample window for type inference.
    sampling: Sampling,
    /// Preview rows kept in the report.
    preview_rows: usize,
    /// Letter substitution ratios.
    ratios: SubstitutionRatios,
    /// Checked before every line; set it to stop the run.
    cancel: Option<Arc<AtomicBool>>,
}

impl Masker {
    /// Create a Masker with default settings for `layout`.
    pub fn new(layout: LayoutDescriptor) -> Self {
        Self {
            layout,
            sampling: Sampling::default(),
            preview_rows: DEFAULT_PREVIEW_ROWS,
            ratios: SubstitutionRatios::default(),
            cancel: None,
        }
    }

    /// Set the number of non-empty data lines sampled for classification.
    pub fn sample_lines(&mut self, lines: usize) -> &mut Self {
        self.sampling.lines = lines;
        self
    }

    /// Set the number of sampled rows the classifier votes on.
    pub fn classifier_rows(&mut self, rows: usize) -> &mut Self {
        self.sampling.classifier_rows = rows;
        self
    }

    /// Set the number of preview rows kept in the report.
    pub fn preview_rows(&mut self, rows: usize) -> &mut Self {
        self.preview_rows = rows;
        self
    }

    /// Set the letter substitution ratios.
    pub fn ratios(&mut self, ratios: SubstitutionRatios) -> &mut Self {
        self.ratios = ratios;
        self
    }

    /// Install a flag checked between lines. Setting it aborts the run
    /// with [`MaskError::Cancelled`].
    pub fn cancel_flag(&mut self, flag: Arc<AtomicBool>) -> &mut Self {
        self.cancel = Some(flag);
        self
    }

    /// The layout in use.
    pub fn layout(&self) -> &LayoutDescriptor {
        &self.layout
    }

    /// Mask the file at `input` into `output`.
    ///
    /// The input encoding is detected; UTF-8 input is streamed, other
    /// encodings are transcoded in memory. Output is always UTF-8. The
    /// parent directory of `output` is created if missing.
    pub fn transform_path<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        input: P,
        output: Q,
    ) -> Result<MaskReport> {
        let mut file = File::open(input.as_ref())?;
        let mut head = Vec::new();
        (&mut file).take(ENCODING_SNIFF_BYTES).read_to_end(&mut head)?;
        let info = detect_encoding(&head);

        if let Some(parent) = output.as_ref().parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let writer = BufWriter::new(File::create(output.as_ref())?);

        let mut report = if info.is_utf8() {
            let mut head = Cursor::new(head);
            head.set_position(info.bom_len() as u64);
            self.transform_reader(BufReader::new(head.chain(file)), writer)?
        } else {
            file.read_to_end(&mut head)?;
            tracing::debug!(
                encoding = info.name(),
                bytes = head.len(),
                lines = bytecount::count(&head, b'\n'),
                "transcoding input"
            );
            let (text, _) = info.encoding.decode_without_bom_handling(&head[info.bom_len()..]);
            self.transform_lines(text.lines().map(|l| Ok(l.to_string())), writer)?
        };

        report.encoding = Some(info.name());
        log_summary(output.as_ref(), &info, &report);
        Ok(report)
    }

    /// Mask UTF-8 text from a reader into a writer.
    ///
    /// Invalid UTF-8 sequences are replaced with U+FFFD instead of failing
    /// the run.
    pub fn transform_reader<R: BufRead, W: Write>(&self, reader: R, writer: W) -> Result<MaskReport> {
        self.transform_lines(LossyLines::new(reader), writer)
    }

    /// Mask in-memory text, returning the output text and the report.
    pub fn transform_str(&self, text: &str) -> Result<(String, MaskReport)> {
        let mut out = Vec::with_capacity(text.len());
        let report = self.transform_lines(text.lines().map(|l| Ok(l.to_string())), &mut out)?;
        // every written piece came from &str input
        let out = String::from_utf8(out)
            .map_err(|e| MaskError::Io(io::Error::new(io::ErrorKind::InvalidData, e)))?;
        Ok((out, report))
    }

    /// Mask a stream of lines (without terminators) into `writer`.
    ///
    /// Every output line ends with `\n`.
    pub fn transform_lines<I, W>(&self, lines: I, mut writer: W) -> Result<MaskReport>
    where
        I: IntoIterator<Item = io::Result<String>>,
        W: Write,
    {
        self.validate()?;

        let mut lines = lines.into_iter().enumerate();
        let layout = self.layout;
        let mut run = Run {
            masker: self,
            engine: Engine::with_ratios(self.ratios)?,
            report: MaskReport::default(),
        };

        // Phase 1: buffer data lines up to the end of the sample window.
        let window = self.fill_window(&mut lines, &mut run, &mut writer)?;
        if window.exhausted && layout.data_start >= window.total_lines {
            return Err(MaskError::DataStartOutOfRange {
                data_start: layout.data_start,
                total_lines: window.total_lines,
            });
        }

        let sample: Vec<&str> = window
            .buffered
            .iter()
            .filter(|(idx, line)| is_data_line(&layout, *idx, line))
            .map(|(_, line)| line.as_str())
            .collect();
        run.report.column_types =
            classify_with_limit(&sample, layout.separator, self.sampling.classifier_rows);
        tracing::debug!(
            sampled = sample.len(),
            buffered = window.buffered.len(),
            "sample window read"
        );

        // Phase 2: the buffered window, then the rest of the input.
        for (idx, line) in window.buffered {
            run.process(idx, &line, &mut writer)?;
        }
        for (idx, line) in lines {
            run.process(idx, &line?, &mut writer)?;
        }
        writer.flush()?;

        Ok(run.finish())
    }

    /// Read lines until `sampling.lines` data lines are buffered.
    ///
    /// Lines before the data start and blank lines go straight through the
    /// run; only data lines and later header lines are held.
    fn fill_window<I, W>(&self, lines: &mut I, run: &mut Run<'_>, writer: &mut W) -> Result<Window>
    where
        I: Iterator<Item = (usize, io::Result<String>)>,
        W: Write,
    {
        let layout = &self.layout;
        let mut window = Window::default();
        let mut sampled = 0;

        while sampled < self.sampling.lines {
            let Some((idx, line)) = lines.next() else {
                window.exhausted = true;
                break;
            };
            let line = line?;
            window.total_lines = idx + 1;

            if is_data_line(layout, idx, &line) {
                sampled += 1;
            } else if idx < layout.data_start || !layout.is_header(idx) {
                run.process(idx, &line, writer)?;
                continue;
            }
            window.buffered.push((idx, line));
        }
        Ok(window)
    }

    fn validate(&self) -> Result<()> {
        if self.sampling.lines == 0 || self.sampling.classifier_rows == 0 {
            return Err(MaskError::InvalidConfig(
                "sample window must hold at least one line".to_string(),
            ));
        }
        self.ratios.validate()
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

/// Mask `source` with default settings, returning the output lines and the
/// column types.
pub fn transform(source: &str, layout: LayoutDescriptor) -> Result<(Vec<String>, ColumnTypes)> {
    let (text, report) = Masker::new(layout).transform_str(source)?;
    let lines = text.lines().map(str::to_string).collect();
    Ok((lines, report.column_types))
}

/// Head of the input held back until the columns are classified.
#[derive(Debug, Default)]
struct Window {
    /// Header and data lines from `data_start` on, with their line numbers.
    buffered: Vec<(usize, String)>,
    /// Lines read so far.
    total_lines: usize,
    /// The input ended inside the window.
    exhausted: bool,
}

/// Lines of a reader without terminators, decoded lossily.
struct LossyLines<R> {
    reader: R,
    buf: Vec<u8>,
    replaced: usize,
}

impl<R: BufRead> LossyLines<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            replaced: 0,
        }
    }
}

impl<R: BufRead> Iterator for LossyLines<R> {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.buf.clear();
        match self.reader.read_until(b'\n', &mut self.buf) {
            Ok(0) => {
                if self.replaced > 0 {
                    tracing::warn!(lines = self.replaced, "invalid UTF-8 replaced");
                }
                None
            }
            Ok(_) => {
                if self.buf.last() == Some(&b'\n') {
                    self.buf.pop();
                    if self.buf.last() == Some(&b'\r') {
                        self.buf.pop();
                    }
                }
                let line = match String::from_utf8_lossy(&self.buf) {
                    Cow::Borrowed(line) => line.to_string(),
                    Cow::Owned(line) => {
                        self.replaced += 1;
                        line
                    }
                };
                Some(Ok(line))
            }
            Err(e) => Some(Err(e)),
        }
    }
}

/// A line that feeds the classifier and gets masked.
#[inline]
fn is_data_line(layout: &LayoutDescriptor, idx: usize, line: &str) -> bool {
    idx >= layout.data_start && !layout.is_header(idx) && !line.trim().is_empty()
}

/// State of one masking run. The engine, and its memo, live exactly as long.
struct Run<'a> {
    masker: &'a Masker,
    engine: Engine,
    report: MaskReport,
}

impl Run<'_> {
    fn process<W: Write>(&mut self, idx: usize, line: &str, writer: &mut W) -> Result<()> {
        if self.masker.is_cancelled() {
            return Err(MaskError::Cancelled { line: idx });
        }

        let layout = &self.masker.layout;
        if layout.is_header(idx) {
            writeln!(writer, "{line}")?;
            self.report.header_lines += 1;
            return Ok(());
        }
        if !is_data_line(layout, idx, line) {
            self.report.skipped_lines += 1;
            return Ok(());
        }

        let masked = self.mask_row(line);
        writeln!(writer, "{masked}")?;
        self.report.data_rows += 1;

        if self.report.preview.len() < self.masker.preview_rows {
            self.report.preview.push(PreviewRow {
                original: line.to_string(),
                masked,
            });
        }
        Ok(())
    }

    fn mask_row(&mut self, line: &str) -> String {
        let sep = self.masker.layout.separator.as_str();
        let types = &self.report.column_types;
        let engine = &mut self.engine;

        line.split(sep)
            .enumerate()
            .map(|(i, field)| engine.anonymize(field, types.get(i)))
            .collect::<Vec<_>>()
            .join(sep)
    }

    fn finish(mut self) -> MaskReport {
        self.report.pass_through = self.engine.pass_through_count();
        self.report.distinct_values = self.engine.memo_len();
        tracing::info!(
            header_lines = self.report.header_lines,
            data_rows = self.report.data_rows,
            skipped_lines = self.report.skipped_lines,
            distinct_values = self.report.distinct_values,
            pass_through = self.report.pass_through,
            "masking finished"
        );
        self.report
    }
}

fn log_summary(output: &Path, info: &EncodingInfo, report: &MaskReport) {
    tracing::info!(
        output = %output.display(),
        encoding = info.name(),
        bom = info.has_bom,
        columns = report.column_types.len(),
        "wrote masked file"
    );
}
