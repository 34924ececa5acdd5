/// 一个像素字 (ARGB 各 8 bits) 的位数。
/// 隐藏一个秘密像素需要 32 个载体像素，每个载体像素只承载 1 bit。
pub const BITS_PER_PIXEL_WORD: u64 = 32;

/// 一个文本字节的位数。
/// 文本按字节逐位写入，需要 8 个载体像素。
pub const BITS_PER_BYTE: u64 = 8;

/// 文本载荷末尾追加的终止字节。
pub const TEXT_TERMINATOR: u8 = 0;

/// 只读写像素字的第 0 位。
pub const LSB_MASK: u32 = 0x0000_0001;

/// 未指定输出路径时，隐写结果图像的文件名前缀。
pub const EMBED_PREFIX: &str = "doctored_";

/// 未指定输出路径时，恢复出的秘密图像的文件名前缀。
pub const RECOVER_PREFIX: &str = "recovered_";

/// 默认输出格式的扩展名。必须是无损格式。
pub const DEFAULT_EXTENSION: &str = "png";

/// 有损格式会破坏最低有效位中的数据，保存时拒绝这些扩展名。
pub const LOSSY_EXTENSIONS: &[&str] = &["jpg", "jpeg"];
