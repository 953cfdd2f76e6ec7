use crate::core::plot::{AxisRange, PlotData, PlotPoint};
use anyhow::Result;
use std::io::Write;

pub fn write<P: PlotPoint>(w: &mut dyn Write, data: &PlotData<P>) -> Result<()> {
    writeln!(w, ">>Q Score Histogram")?;
    writeln!(w, "Title\t{}", data.title)?;
    writeln!(w, "X Label\t{}", data.x_label)?;
    writeln!(w, "Y Label\t{}", data.y_label)?;
    write_range(w, "X Range", data.x_range)?;
    write_range(w, "Y Range", data.y_range)?;
    for series in &data.series {
        let options: Vec<&str> = series.options.iter().map(|o| o.as_str()).collect();
        writeln!(
            w,
            "Series\t{}\t{}\t{}",
            series.title,
            series.kind.as_str(),
            options.join(",")
        )?;
        writeln!(w, "#X\tHeight\tWidth")?;
        for p in &series.points {
            writeln!(
                w,
                "{}\t{}\t{}",
                fmt_value(p.x()),
                fmt_value(p.y()),
                fmt_value(p.width())
            )?;
        }
    }
    writeln!(w, ">>END_MODULE")?;
    Ok(())
}

fn write_range(w: &mut dyn Write, name: &str, range: Option<AxisRange>) -> Result<()> {
    if let Some(r) = range {
        writeln!(w, "{}\t{}\t{}", name, fmt_value(r.min), fmt_value(r.max))?;
    }
    Ok(())
}

fn fmt_value(v: f64) -> String {
    if (v - v.round()).abs() < 1e-9 {
        return format!("{}", v.round() as i64);
    }
    // small bars keep their magnitude instead of rounding to 0
    if v.abs() < 1e-3 {
        return format!("{:e}", v);
    }
    let s = format!("{:.4}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
