use crate::errors::{OdbError, OdbResult};
use std::io::BufRead;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ObjectType {
    Blob,
    Tree,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Tree => "tree",
            ObjectType::Commit => "commit",
        }
    }

    /// Render the `<type> <size>\0` header that prefixes every stored object.
    pub fn header(&self, size: usize) -> String {
        format!("{} {}\0", self.as_str(), size)
    }

    /// Parse the `<type> <size>\0` header, leaving the reader at the first body byte.
    pub fn parse_header(data_reader: &mut impl BufRead) -> OdbResult<(ObjectType, usize)> {
        let mut object_type = Vec::new();
        data_reader.read_until(b' ', &mut object_type)?;
        if object_type.pop() != Some(b' ') {
            return Err(OdbError::format("object header has no type terminator"));
        }

        let mut size = Vec::new();
        data_reader.read_until(b'\0', &mut size)?;
        if size.pop() != Some(b'\0') {
            return Err(OdbError::format("object header has no size terminator"));
        }

        let object_type = std::str::from_utf8(&object_type)
            .map_err(|_| OdbError::format("object type is not valid UTF-8"))?;
        let object_type = ObjectType::try_from(object_type)?;

        let size = std::str::from_utf8(&size)
            .ok()
            .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|s| s.parse::<usize>().ok())
            .ok_or_else(|| {
                OdbError::format(format!(
                    "invalid object size {:?}",
                    String::from_utf8_lossy(&size)
                ))
            })?;

        Ok((object_type, size))
    }
}

impl TryFrom<&str> for ObjectType {
    type Error = OdbError;

    fn try_from(value: &str) -> OdbResult<Self> {
        match value {
            "blob" => Ok(ObjectType::Blob),
            "tree" => Ok(ObjectType::Tree),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(OdbError::UnknownType(value.to_string())),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use std::io::{Cursor, Read};

    #[rstest]
    #[case(ObjectType::Blob, 13, "blob 13\0")]
    #[case(ObjectType::Tree, 0, "tree 0\0")]
    #[case(ObjectType::Commit, 245, "commit 245\0")]
    fn header_round_trips(#[case] object_type: ObjectType, #[case] size: usize, #[case] text: &str) {
        assert_eq!(object_type.header(size), text);

        let mut reader = Cursor::new(text.as_bytes());
        assert_eq!(
            ObjectType::parse_header(&mut reader).unwrap(),
            (object_type, size)
        );
    }

    #[test]
    fn parse_header_leaves_reader_at_body() {
        let mut reader = Cursor::new(b"blob 5\0hello".to_vec());
        ObjectType::parse_header(&mut reader).unwrap();

        let mut body = String::new();
        reader.read_to_string(&mut body).unwrap();
        assert_eq!(body, "hello");
    }

    #[test]
    fn unknown_type_is_reported() {
        let mut reader = Cursor::new(b"tag 3\0abc".to_vec());
        assert!(matches!(
            ObjectType::parse_header(&mut reader),
            Err(OdbError::UnknownType(t)) if t == "tag"
        ));
    }

    #[rstest]
    #[case::no_space(&b"blob"[..])]
    #[case::no_nul(&b"blob 12"[..])]
    #[case::empty_size(&b"blob \0"[..])]
    #[case::signed_size(&b"blob -1\0"[..])]
    #[case::non_digit_size(&b"blob 1x\0"[..])]
    fn malformed_headers_are_format_errors(#[case] data: &[u8]) {
        let mut reader = Cursor::new(data);
        assert!(matches!(
            ObjectType::parse_header(&mut reader),
            Err(OdbError::Format(_))
        ));
    }
}
