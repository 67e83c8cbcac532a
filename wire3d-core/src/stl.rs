//! STL files as object templates
//!
//! Both binary and ASCII STL are accepted. Triangle corners that share a
//! position are welded into one point, each triangle becomes a surface and
//! each distinct triangle side becomes an edge. The template is centred on
//! the origin so it can be placed with [`Object::import`].
use std::collections::{BTreeSet, HashMap};

use nom::{
    bytes::complete::{tag, take},
    character::complete::{multispace0, multispace1, not_line_ending},
    combinator::{all_consuming, opt},
    multi::{count, many0},
    number::complete::{float, le_f32, le_u16, le_u32},
    sequence::{preceded, terminated, tuple},
    IResult,
};

use crate::error::SceneError;
use crate::geometry::{Color, Object, Point};
use crate::transform::Transform;

type Facet = [[f32; 3]; 3];

const HEADER_LEN: usize = 80;

/// Parse STL data (binary or ASCII) into a template named `name`
pub fn parse_stl(name: &str, color: Color, data: &[u8]) -> Result<Object, SceneError> {
    let facets = if data.starts_with(b"solid") {
        // Some binary exporters also start their header with "solid"
        match std::str::from_utf8(data).ok().map(parse_ascii) {
            Some(Ok(facets)) => facets,
            _ => parse_binary(data)?,
        }
    } else {
        parse_binary(data)?
    };

    log::debug!("parsed STL `{name}` with {} facets", facets.len());
    Ok(weld(name, color, &facets))
}

fn parse_binary(data: &[u8]) -> Result<Vec<Facet>, SceneError> {
    binary_stl(data)
        .map(|(_, facets)| facets)
        .map_err(|e| SceneError::Stl(format!("binary: {e:?}")))
}

fn parse_ascii(text: &str) -> Result<Vec<Facet>, SceneError> {
    ascii_stl(text)
        .map(|(_, facets)| facets)
        .map_err(|e| SceneError::Stl(format!("ascii: {e:?}")))
}

fn binary_stl(input: &[u8]) -> IResult<&[u8], Vec<Facet>> {
    let (input, _) = take(HEADER_LEN)(input)?;
    let (input, n) = le_u32(input)?;
    count(binary_facet, n as usize)(input)
}

fn binary_facet(input: &[u8]) -> IResult<&[u8], Facet> {
    // The stored normal is recomputed by renderers that need it
    let (input, _normal) = binary_vector(input)?;
    let (input, a) = binary_vector(input)?;
    let (input, b) = binary_vector(input)?;
    let (input, c) = binary_vector(input)?;
    let (input, _attributes) = le_u16(input)?;
    Ok((input, [a, b, c]))
}

fn binary_vector(input: &[u8]) -> IResult<&[u8], [f32; 3]> {
    let (input, (x, y, z)) = tuple((le_f32, le_f32, le_f32))(input)?;
    Ok((input, [x, y, z]))
}

fn ascii_stl(input: &str) -> IResult<&str, Vec<Facet>> {
    let (input, _) = preceded(multispace0, tag("solid"))(input)?;
    let (input, _name) = not_line_ending(input)?;
    let (input, facets) = many0(ascii_facet)(input)?;
    let (input, _) = preceded(multispace0, tag("endsolid"))(input)?;
    let (input, _) = all_consuming(terminated(opt(not_line_ending), multispace0))(input)?;
    Ok((input, facets))
}

fn ascii_facet(input: &str) -> IResult<&str, Facet> {
    let (input, _) = preceded(multispace0, tag("facet"))(input)?;
    let (input, _) = preceded(multispace1, tag("normal"))(input)?;
    let (input, _normal) = ascii_vector(input)?;
    let (input, _) = preceded(multispace0, tag("outer"))(input)?;
    let (input, _) = preceded(multispace1, tag("loop"))(input)?;
    let (input, a) = ascii_vertex(input)?;
    let (input, b) = ascii_vertex(input)?;
    let (input, c) = ascii_vertex(input)?;
    let (input, _) = preceded(multispace0, tag("endloop"))(input)?;
    let (input, _) = preceded(multispace0, tag("endfacet"))(input)?;
    Ok((input, [a, b, c]))
}

fn ascii_vertex(input: &str) -> IResult<&str, [f32; 3]> {
    preceded(preceded(multispace0, tag("vertex")), ascii_vector)(input)
}

fn ascii_vector(input: &str) -> IResult<&str, [f32; 3]> {
    let (input, x) = preceded(multispace0, float)(input)?;
    let (input, y) = preceded(multispace1, float)(input)?;
    let (input, z) = preceded(multispace1, float)(input)?;
    Ok((input, [x, y, z]))
}

/// Bit pattern used to match corners; `-0.0` and `0.0` are the same corner
fn weld_bits(c: f32) -> u32 {
    if c == 0.0 {
        0
    } else {
        c.to_bits()
    }
}

fn weld(name: &str, color: Color, facets: &[Facet]) -> Object {
    let mut index_of: HashMap<[u32; 3], usize> = HashMap::new();
    let mut points = Vec::new();
    let mut edges = BTreeSet::new();
    let mut surfaces = Vec::with_capacity(facets.len());

    for facet in facets {
        let corners: Vec<usize> = facet
            .iter()
            .map(|v| {
                let key = [weld_bits(v[0]), weld_bits(v[1]), weld_bits(v[2])];
                *index_of.entry(key).or_insert_with(|| {
                    points.push(Point::new(f64::from(v[0]), f64::from(v[1]), f64::from(v[2])));
                    points.len() - 1
                })
            })
            .collect();

        // Slivers with welded corners cannot be drawn as polygons
        if corners[0] == corners[1] || corners[1] == corners[2] || corners[0] == corners[2] {
            continue;
        }
        for i in 0..3 {
            let (a, b) = (corners[i], corners[(i + 1) % 3]);
            edges.insert((a.min(b), a.max(b)));
        }
        surfaces.push(corners);
    }

    let mut template = Object::new(name, color, points, edges.into_iter().collect(), surfaces);
    let centre = template.midpoint;
    template.apply(&Transform::translate(&Transform::identity(), -centre.x, -centre.y, -centre.z));
    template
}
