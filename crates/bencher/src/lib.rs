/// One benchmark input: an SCGI request file delivered in chunks of `chunk_size` bytes.
#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    file: TestFile,
    chunk_size: usize,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, file: TestFile, chunk_size: usize) -> Self {
        assert!(chunk_size > 0, "chunk size must be positive");
        Self { name, group, file, chunk_size }
    }

    /// The whole file arrives in one chunk.
    pub fn whole(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Whole, file, file.content.len().max(1))
    }

    /// The file arrives in network sized chunks.
    pub fn segmented(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Segmented, file, 1460)
    }

    /// The file arrives a few bytes at a time.
    pub fn trickled(name: &'static str, file: TestFile) -> Self {
        Self::new(name, TestGroup::Trickled, file, 7)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn file(&self) -> &TestFile {
        &self.file
    }

    pub fn file_name(&self) -> &'static str {
        self.file().file_name
    }

    pub fn chunk_size(&self) -> usize {
        self.chunk_size
    }

    pub fn chunks(&self) -> impl Iterator<Item = &'static [u8]> {
        self.file.content.chunks(self.chunk_size)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct TestFile {
    file_name: &'static str,
    content: &'static [u8],
}

impl TestFile {
    pub const fn new(file_name: &'static str, content: &'static [u8]) -> Self {
        Self { file_name, content }
    }

    pub fn content(&self) -> &'static [u8] {
        self.content
    }

    pub fn file_name(&self) -> &'static str {
        self.file_name
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Whole,
    Segmented,
    Trickled,
}
