use crate::core::{PropertyRecord, PropertyTable, SearchFilter};
use crate::utils::error::{RelayError, Result};

/// 回傳第一筆 location 與 bhk 都相符 (忽略大小寫) 的物件
///
/// 只做大小寫轉換後的完全比對，不去除空白也不做部分比對。
pub fn find_property<'a>(table: &'a PropertyTable, filter: &SearchFilter) -> Result<&'a PropertyRecord> {
    let location = filter.location.to_lowercase();
    let bhk = filter.bhk.to_lowercase();

    table
        .iter()
        .find(|record| record.location.to_lowercase() == location && record.bhk.to_lowercase() == bhk)
        .ok_or_else(RelayError::not_found)
}
