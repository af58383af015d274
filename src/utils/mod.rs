pub(crate) mod date;
pub(crate) mod timezone;

pub(crate) use date::normalize_date;
pub(crate) use timezone::Timezone;
