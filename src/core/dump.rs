//! Tab-separated metric dump: the run layout, the Q-score bin table and the
//! per-tile / per-lane Q-score records, in `>>Section ... >>END_MODULE`
//! blocks.

use crate::core::error::{PlotError, PlotResult};
use crate::core::io::InputBytes;
use crate::core::model::{QByLaneMetric, QMetric, QScoreBin, ReadInfo, RunMetrics};
use anyhow::{Context, Result};
use memchr::memchr_iter;
use std::path::Path;
use std::str::FromStr;

const END_MODULE: &str = ">>END_MODULE";

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Section {
    Run,
    Bins,
    QMetrics,
    QByLane,
}

impl Section {
    fn from_header(name: &str) -> Option<Self> {
        match name.trim() {
            "Run" => Some(Section::Run),
            "Bins" => Some(Section::Bins),
            "Q Metrics" => Some(Section::QMetrics),
            "Q By Lane" => Some(Section::QByLane),
            _ => None,
        }
    }
}

pub fn load(path: &Path) -> Result<RunMetrics> {
    let input = InputBytes::open(path)?;
    parse(input.bytes()).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn parse(bytes: &[u8]) -> PlotResult<RunMetrics> {
    let mut metrics = RunMetrics::default();
    let mut bins = Vec::new();
    let mut section: Option<Section> = None;

    for (idx, raw) in lines(bytes).enumerate() {
        let line_no = idx + 1;
        let line = std::str::from_utf8(raw).map_err(|_| err(line_no, "line is not valid UTF-8"))?;
        let line = line.trim_end_matches('\r');
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }
        if line == END_MODULE {
            if section.take().is_none() {
                return Err(err(line_no, ">>END_MODULE outside of a section"));
            }
            continue;
        }
        if let Some(name) = line.strip_prefix(">>") {
            if section.is_some() {
                return Err(err(line_no, "section opened before the previous one ended"));
            }
            section = Some(
                Section::from_header(name)
                    .ok_or_else(|| err(line_no, &format!("unknown section '{}'", name)))?,
            );
            continue;
        }
        let fields: Vec<&str> = line.split('\t').collect();
        match section {
            Some(Section::Run) => parse_run_line(&fields, line_no, &mut metrics)?,
            Some(Section::Bins) => bins.push(parse_bin(&fields, line_no)?),
            Some(Section::QMetrics) => metrics.q_metrics.push(parse_q_metric(&fields, line_no)?),
            Some(Section::QByLane) => metrics.q_by_lane.push(parse_q_by_lane(&fields, line_no)?),
            None => return Err(err(line_no, "data line outside of a section")),
        }
    }
    if let Some(open) = section {
        return Err(err(
            lines(bytes).count(),
            &format!("section {:?} is missing >>END_MODULE", open),
        ));
    }

    metrics.q_metrics.set_bins(bins.clone());
    metrics.q_by_lane.set_bins(bins);
    log::debug!(
        "metric dump: {} reads, {} tile records, {} lane records, {} bins",
        metrics.run_info.reads.len(),
        metrics.q_metrics.len(),
        metrics.q_by_lane.len(),
        metrics.q_metrics.bins().len()
    );
    Ok(metrics)
}

fn lines(bytes: &[u8]) -> impl Iterator<Item = &[u8]> {
    let mut start = 0usize;
    let mut ends = memchr_iter(b'\n', bytes);
    std::iter::from_fn(move || {
        if start > bytes.len() {
            return None;
        }
        match ends.next() {
            Some(end) => {
                let line = &bytes[start..end];
                start = end + 1;
                Some(line)
            }
            None => {
                let line = &bytes[start..];
                start = bytes.len() + 1;
                if line.is_empty() { None } else { Some(line) }
            }
        }
    })
}

fn parse_run_line(fields: &[&str], line_no: usize, metrics: &mut RunMetrics) -> PlotResult<()> {
    match fields[0] {
        "Flowcell" => {
            metrics.run_info.flowcell.barcode = fields.get(1).copied().unwrap_or("").to_string();
        }
        "Surfaces" => {
            expect_len(fields, 2, line_no)?;
            metrics.run_info.flowcell.surface_count = num(fields[1], line_no, "surface count")?;
        }
        "Read" => {
            expect_len(fields, 4, line_no)?;
            let read = ReadInfo {
                number: num(fields[1], line_no, "read number")?,
                first_cycle: num(fields[2], line_no, "first cycle")?,
                last_cycle: num(fields[3], line_no, "last cycle")?,
            };
            if read.first_cycle > read.last_cycle {
                return Err(err(line_no, "read ends before it starts"));
            }
            metrics.run_info.reads.push(read);
        }
        other => return Err(err(line_no, &format!("unknown run field '{}'", other))),
    }
    Ok(())
}

fn parse_bin(fields: &[&str], line_no: usize) -> PlotResult<QScoreBin> {
    expect_len(fields, 3, line_no)?;
    let bin = QScoreBin::new(
        num(fields[0], line_no, "bin lower")?,
        num(fields[1], line_no, "bin upper")?,
        num(fields[2], line_no, "bin value")?,
    );
    if bin.lower > bin.upper {
        return Err(err(line_no, "bin lower bound exceeds upper bound"));
    }
    Ok(bin)
}

fn parse_q_metric(fields: &[&str], line_no: usize) -> PlotResult<QMetric> {
    if fields.len() < 5 {
        return Err(err(line_no, "expected lane, tile, surface, cycle and counts"));
    }
    Ok(QMetric {
        lane: num(fields[0], line_no, "lane")?,
        tile: num(fields[1], line_no, "tile")?,
        surface: num(fields[2], line_no, "surface")?,
        cycle: num(fields[3], line_no, "cycle")?,
        counts: counts(&fields[4..], line_no)?,
    })
}

fn parse_q_by_lane(fields: &[&str], line_no: usize) -> PlotResult<QByLaneMetric> {
    if fields.len() < 3 {
        return Err(err(line_no, "expected lane, cycle and counts"));
    }
    Ok(QByLaneMetric {
        lane: num(fields[0], line_no, "lane")?,
        cycle: num(fields[1], line_no, "cycle")?,
        counts: counts(&fields[2..], line_no)?,
    })
}

fn counts(fields: &[&str], line_no: usize) -> PlotResult<Vec<u64>> {
    fields.iter().map(|f| num(f, line_no, "count")).collect()
}

fn num<T: FromStr>(field: &str, line_no: usize, what: &str) -> PlotResult<T> {
    field
        .trim()
        .parse()
        .map_err(|_| err(line_no, &format!("invalid {} '{}'", what, field)))
}

fn expect_len(fields: &[&str], want: usize, line_no: usize) -> PlotResult<()> {
    if fields.len() != want {
        return Err(err(
            line_no,
            &format!("expected {} fields, found {}", want, fields.len()),
        ));
    }
    Ok(())
}

fn err(line: usize, message: &str) -> PlotError {
    PlotError::Parse {
        line,
        message: message.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::AccumulateRecord;

    const DUMP: &str = "\
>>Run
Flowcell\tH7KJ2BGXY
Surfaces\t2
Read\t1\t1\t151
Read\t2\t152\t159
>>END_MODULE
>>Bins
#Lower\tUpper\tValue
1\t14\t12
15\t29\t23
30\t41\t37
>>END_MODULE
>>Q Metrics
#Lane\tTile\tSurface\tCycle\tCounts
1\t1101\t1\t1\t10\t20\t30
1\t2101\t2\t1\t1\t2\t3
>>END_MODULE
";

    #[test]
    fn parses_all_sections() {
        let m = parse(DUMP.as_bytes()).unwrap();
        assert_eq!(m.run_info.flowcell.barcode, "H7KJ2BGXY");
        assert_eq!(m.run_info.flowcell.surface_count, 2);
        assert_eq!(m.run_info.reads.len(), 2);
        assert_eq!(m.run_info.read(2).unwrap().last_cycle, 159);
        assert_eq!(m.q_metrics.len(), 2);
        assert_eq!(m.q_metrics.bins().len(), 3);
        assert_eq!(m.q_by_lane.bins().len(), 3);
        assert!(m.q_by_lane.is_empty());
        let second = &m.q_metrics.records()[1];
        assert_eq!((second.lane, second.tile, second.surface), (1, 2101, 2));
        assert_eq!(second.size(), 3);
    }

    #[test]
    fn parses_lane_section_and_crlf() {
        let text = ">>Q By Lane\r\n3\t7\t0\t5\r\n>>END_MODULE\r\n";
        let m = parse(text.as_bytes()).unwrap();
        let rec = &m.q_by_lane.records()[0];
        assert_eq!((rec.lane, rec.cycle), (3, 7));
        assert_eq!(rec.counts, vec![0, 5]);
        assert!(m.q_metrics.bins().is_empty());
    }

    #[test]
    fn empty_input_is_empty_run() {
        let m = parse(b"").unwrap();
        assert!(m.q_metrics.is_empty());
        assert!(m.run_info.reads.is_empty());
    }

    #[test]
    fn bad_number_reports_line() {
        let text = ">>Q Metrics\n1\t1101\t1\t1\t5\n1\t1101\t1\tx\t5\n>>END_MODULE\n";
        let e = parse(text.as_bytes()).unwrap_err();
        assert!(matches!(e, PlotError::Parse { line: 3, .. }));
    }

    #[test]
    fn unterminated_section_fails() {
        let e = parse(b">>Bins\n1\t2\t1\n").unwrap_err();
        assert!(matches!(e, PlotError::Parse { .. }));
    }

    #[test]
    fn unknown_section_fails() {
        let e = parse(b">>Tile Metrics\n>>END_MODULE\n").unwrap_err();
        assert!(matches!(e, PlotError::Parse { line: 1, .. }));
    }

    #[test]
    fn data_outside_section_fails() {
        assert!(parse(b"1\t2\t3\n").is_err());
    }

    #[test]
    fn inverted_bin_fails() {
        assert!(parse(b">>Bins\n20\t10\t15\n>>END_MODULE\n").is_err());
    }
}
