use aer_wire::Fourcc;

/// Decode rule for a field tag.
///
/// The rule for a tag is fixed by [`FieldKind::for_tag`] and never
/// depends on the field's runtime length, except that a `Double` value
/// may arrive in either the 4-byte compact or the 8-byte IEEE-754
/// encoding.
///
/// ```text
/// ┌───────────────┬────────────────────────────────────────────┐
/// │ Kind          │ Value encoding                             │
/// ├───────────────┼────────────────────────────────────────────┤
/// │ Bool          │ i32 LE, nonzero = true                     │
/// │ Int           │ i32 LE                                     │
/// │ Double        │ i32 LE widened (4 bytes) or f64 LE (8)     │
/// │ Text          │ raw bytes, one trailing NUL stripped       │
/// │ Url           │ as Text, collected into the URL set        │
/// │ IntList       │ n × i32 LE                                 │
/// │ DoubleList    │ n × f64 LE                                 │
/// │ TypeCodeList  │ n × opaque 4-byte code                     │
/// └───────────────┴────────────────────────────────────────────┘
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Bool,
    Int,
    Double,
    Text,
    Url,
    IntList,
    DoubleList,
    TypeCodeList,
}

impl FieldKind {
    /// Look up the decode rule for a tag.
    ///
    /// The vocabulary below was recovered from the original format by
    /// observation; tags not listed decode as opaque bytes. Note the
    /// tags with literal dots (`bl..`) and the mixed-case pair
    /// `oRNt`/`oRnt`: tags are case-sensitive raw bytes, not names.
    #[must_use]
    pub fn for_tag(tag: Fourcc) -> Option<Self> {
        match tag.as_bytes() {
            b"aplt" | b"cnpr" | b"ilbo" | b"isab" | b"isbo" | b"lite" | b"loop" | b"rlbo"
            | b"rldl" | b"rlll" | b"rlsu" | b"rsbo" | b"scty" | b"strt" | b"subt" => {
                Some(Self::Bool)
            }

            b"aple" | b"avcl" | b"dpth" | b"face" | b"facs" | b"ivis" | b"lock" | b"nwst"
            | b"texr" => Some(Self::Int),

            b"bl.." | b"btwi" | b"ca.." | b"da.." | b"db.." | b"de.." | b"dsbr" | b"embr"
            | b"gr.." | b"hite" | b"lmss" | b"mm.." | b"mn.." | b"offu" | b"offv" | b"plny"
            | b"rd.." | b"rota" | b"sb.." | b"sblu" | b"sfbr" | b"sgrn" | b"sizu" | b"sizv"
            | b"so.." | b"sred" | b"su.." | b"sv.." | b"thik" | b"tpwi" | b"widt" | b"wrpu"
            | b"wrpv" => Some(Self::Double),

            b"DFmt" | b"iref" | b"irtc" | b"name" | b"obnm" | b"wlnm" => Some(Self::Text),

            b"icon" | b"irur" | b"jvsr" | b"urln" | b"wrul" => Some(Self::Url),

            b"cn3s" | b"list" | b"lmls" | b"stl2" => Some(Self::IntList),

            b"lkdr" | b"oRNt" | b"oRnt" | b"size" | b"vals" => Some(Self::DoubleList),

            b"idnt" | b"stid" => Some(Self::TypeCodeList),

            _ => None,
        }
    }

    /// Diagnostic name, used in warnings and dumps.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::Double => "double",
            Self::Text => "text",
            Self::Url => "url",
            Self::IntList => "int list",
            Self::DoubleList => "double list",
            Self::TypeCodeList => "type-code list",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_tags_resolve() {
        let cases: [(&[u8; 4], FieldKind); 8] = [
            (b"aplt", FieldKind::Bool),
            (b"dpth", FieldKind::Int),
            (b"widt", FieldKind::Double),
            (b"obnm", FieldKind::Text),
            (b"urln", FieldKind::Url),
            (b"cn3s", FieldKind::IntList),
            (b"vals", FieldKind::DoubleList),
            (b"stid", FieldKind::TypeCodeList),
        ];
        for (tag, kind) in cases {
            assert_eq!(FieldKind::for_tag(Fourcc::new(*tag)), Some(kind), "{kind:?}");
        }
    }

    #[test]
    fn dotted_tags_resolve() {
        assert_eq!(
            FieldKind::for_tag(Fourcc::new(*b"bl..")),
            Some(FieldKind::Double)
        );
        assert_eq!(
            FieldKind::for_tag(Fourcc::new(*b"rd..")),
            Some(FieldKind::Double)
        );
    }

    #[test]
    fn orientation_tags_are_case_sensitive() {
        assert_eq!(
            FieldKind::for_tag(Fourcc::new(*b"oRNt")),
            Some(FieldKind::DoubleList)
        );
        assert_eq!(
            FieldKind::for_tag(Fourcc::new(*b"oRnt")),
            Some(FieldKind::DoubleList)
        );
        assert_eq!(FieldKind::for_tag(Fourcc::new(*b"ornt")), None);
    }

    #[test]
    fn unlisted_tag_has_no_rule() {
        assert_eq!(FieldKind::for_tag(Fourcc::new(*b"zzzz")), None);
        assert_eq!(FieldKind::for_tag(Fourcc::new([0, 1, 2, 3])), None);
    }
}
