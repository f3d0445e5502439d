//! Byte encoding of function curves

use byteorder::{LittleEndian, WriteBytesExt};

use super::{
    ColorMode, CurveKind, CurveOutput, CurveShape, ExponentCurve, FunctionCurve,
    MULTI_LINEAR_KEY_RESERVED, MULTI_SPLINE_RESERVED, PeriodicCurve, PeriodicShape,
    TransitionShape,
};
use crate::error::{Error, Result};
use crate::formats::common::{Bgra, Point2, TagReader, write_padding};

type LE = LittleEndian;

impl FunctionCurve {
    /// Decode a curve from exactly `data`.
    ///
    /// The buffer length must equal the size implied by the variant byte.
    pub fn decode(data: &[u8]) -> Result<Self> {
        let mut reader = TagReader::new(data, "function");
        let kind = CurveKind::from_u8(reader.read_u8()?)?;
        if data.len() != kind.size() {
            return Err(Error::SizeMismatch {
                structure: "function",
                expected: kind.size(),
                found: data.len(),
            });
        }

        let range_check = reader.read_u8()?;
        reader.skip(2)?;
        let output = read_output(&mut reader, range_check)?;
        let shape = read_shape(&mut reader, kind)?;
        reader.finish()?;

        Ok(Self { output, shape })
    }

    /// Encode the curve; the length always matches [`FunctionCurve::size`].
    pub fn encode(&self) -> Result<Vec<u8>> {
        let kind = self.kind();
        let mut out = Vec::with_capacity(kind.size());
        out.push(kind as u8);
        out.push(self.output.range_check());
        write_padding(&mut out, 2);
        write_output(&mut out, &self.output)?;
        write_shape(&mut out, &self.shape)?;

        if out.len() != kind.size() {
            return Err(Error::SizeMismatch {
                structure: "function",
                expected: kind.size(),
                found: out.len(),
            });
        }
        Ok(out)
    }
}

fn read_output(reader: &mut TagReader<'_>, range_check: u8) -> Result<CurveOutput> {
    let Some(mode) = ColorMode::from_range_check(range_check) else {
        let lower = reader.read_f32::<LE>()?;
        let upper = reader.read_f32::<LE>()?;
        reader.skip(8)?;
        return Ok(CurveOutput::Scalar {
            ranged: range_check == 1,
            lower,
            upper,
        });
    };

    let mut stops = [Bgra::default(); 4];
    for stop in &mut stops {
        *stop = Bgra::read(reader)?;
    }
    Ok(CurveOutput::Color { mode, stops })
}

fn write_output(out: &mut Vec<u8>, output: &CurveOutput) -> Result<()> {
    match output {
        CurveOutput::Scalar { lower, upper, .. } => {
            out.write_f32::<LE>(*lower)?;
            out.write_f32::<LE>(*upper)?;
            write_padding(out, 8);
        }
        CurveOutput::Color { stops, .. } => {
            for stop in stops {
                stop.write(out);
            }
        }
    }
    Ok(())
}

fn read_points<const N: usize>(reader: &mut TagReader<'_>) -> Result<[Point2; N]> {
    let mut points = [Point2::default(); N];
    for point in &mut points {
        *point = Point2::read::<LE>(reader)?;
    }
    Ok(points)
}

fn write_points(out: &mut Vec<u8>, points: &[Point2]) -> Result<()> {
    for point in points {
        point.write::<LE>(out)?;
    }
    Ok(())
}

fn read_shape(reader: &mut TagReader<'_>, kind: CurveKind) -> Result<CurveShape> {
    let shape = match kind {
        CurveKind::Identity => CurveShape::Identity,
        CurveKind::Constant => {
            reader.skip(8)?;
            CurveShape::Constant
        }
        CurveKind::Transition => {
            let input = TransitionShape::from_u8(reader.read_u8()?)?;
            let range = TransitionShape::from_u8(reader.read_u8()?)?;
            reader.skip(2)?;
            let min = reader.read_f32::<LE>()?;
            let max = reader.read_f32::<LE>()?;
            reader.skip(4)?;
            CurveShape::Transition { input, range, min, max }
        }
        CurveKind::Periodic => {
            let input = PeriodicShape::from_u8(reader.read_u8()?)?;
            let range = PeriodicShape::from_u8(reader.read_u8()?)?;
            reader.skip(2)?;
            let periodic = PeriodicCurve {
                input,
                range,
                frequency: reader.read_f32::<LE>()?,
                phase: reader.read_f32::<LE>()?,
                input_min: reader.read_f32::<LE>()?,
                input_max: reader.read_f32::<LE>()?,
                range_min: reader.read_f32::<LE>()?,
                range_max: reader.read_f32::<LE>()?,
            };
            reader.skip(4)?;
            CurveShape::Periodic(periodic)
        }
        CurveKind::Linear => {
            let input = read_points::<2>(reader)?;
            let range = read_points::<2>(reader)?;
            reader.skip(16)?;
            CurveShape::Linear { input, range }
        }
        CurveKind::LinearKey => {
            let input = read_points::<4>(reader)?;
            let range = read_points::<4>(reader)?;
            reader.skip(96)?;
            CurveShape::LinearKey { input, range }
        }
        CurveKind::MultiLinearKey => CurveShape::MultiLinearKey {
            reserved: Box::new(reader.read_array::<MULTI_LINEAR_KEY_RESERVED>()?),
        },
        CurveKind::Spline => {
            let input = read_points::<4>(reader)?;
            let range = read_points::<4>(reader)?;
            reader.skip(32)?;
            CurveShape::Spline { input, range }
        }
        CurveKind::MultiSpline => CurveShape::MultiSpline {
            reserved: reader.read_array::<MULTI_SPLINE_RESERVED>()?,
        },
        CurveKind::Exponent => CurveShape::Exponent(ExponentCurve {
            input_min: reader.read_f32::<LE>()?,
            input_max: reader.read_f32::<LE>()?,
            input_exponent: reader.read_f32::<LE>()?,
            range_min: reader.read_f32::<LE>()?,
            range_max: reader.read_f32::<LE>()?,
            range_exponent: reader.read_f32::<LE>()?,
        }),
        CurveKind::Spline2 => {
            let input = read_points::<4>(reader)?;
            let range = read_points::<4>(reader)?;
            reader.skip(32)?;
            CurveShape::Spline2 { input, range }
        }
    };
    Ok(shape)
}

fn write_shape(out: &mut Vec<u8>, shape: &CurveShape) -> Result<()> {
    match shape {
        CurveShape::Identity => {}
        CurveShape::Constant => write_padding(out, 8),
        CurveShape::Transition { input, range, min, max } => {
            out.push(*input as u8);
            out.push(*range as u8);
            write_padding(out, 2);
            out.write_f32::<LE>(*min)?;
            out.write_f32::<LE>(*max)?;
            write_padding(out, 4);
        }
        CurveShape::Periodic(periodic) => {
            out.push(periodic.input as u8);
            out.push(periodic.range as u8);
            write_padding(out, 2);
            for value in [
                periodic.frequency,
                periodic.phase,
                periodic.input_min,
                periodic.input_max,
                periodic.range_min,
                periodic.range_max,
            ] {
                out.write_f32::<LE>(value)?;
            }
            write_padding(out, 4);
        }
        CurveShape::Linear { input, range } => {
            write_points(out, input)?;
            write_points(out, range)?;
            write_padding(out, 16);
        }
        CurveShape::LinearKey { input, range } => {
            write_points(out, input)?;
            write_points(out, range)?;
            write_padding(out, 96);
        }
        CurveShape::MultiLinearKey { reserved } => out.extend_from_slice(&reserved[..]),
        CurveShape::Spline { input, range } | CurveShape::Spline2 { input, range } => {
            write_points(out, input)?;
            write_points(out, range)?;
            write_padding(out, 32);
        }
        CurveShape::MultiSpline { reserved } => out.extend_from_slice(reserved),
        CurveShape::Exponent(exponent) => {
            for value in [
                exponent.input_min,
                exponent.input_max,
                exponent.input_exponent,
                exponent.range_min,
                exponent.range_max,
                exponent.range_exponent,
            ] {
                out.write_f32::<LE>(value)?;
            }
        }
    }
    Ok(())
}
