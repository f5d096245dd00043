use crate::core::PropertyRecord;

/// 將物件資料套入固定的 WhatsApp 訊息模板，欄位值原樣輸出
pub fn format_property_message(record: &PropertyRecord) -> String {
    format!(
        "🏠 *{bhk} Available in {location}*\n\
         - Type: {property_type}\n\
         - Rent: ₹{rent}/month\n\
         - Furnishing: {furnishing}\n\
         - Parking: {parking}\n\
         - Contact: {contact}\n\
         📸 Photos: {photos_link}",
        bhk = record.bhk,
        location = record.location,
        property_type = record.property_type,
        rent = record.rent,
        furnishing = record.furnishing,
        parking = record.parking,
        contact = record.contact,
        photos_link = record.photos_link,
    )
}
