//! Stateless validation predicates for callers of the registry and
//! scanner. Absence and the empty string both count as empty.

pub fn is_empty<T>(value: Option<&T>) -> bool {
    value.is_none()
}

pub fn is_not_empty<T>(value: Option<&T>) -> bool {
    !is_empty(value)
}

pub fn is_empty_str(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

pub fn is_not_empty_str(value: Option<&str>) -> bool {
    !is_empty_str(value)
}
